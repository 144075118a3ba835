//! The `crttr` package: runtime type reflection and casting.

use crate::core::Package;
use crate::ops::compose::compose_package;
use crate::packages::foundation;
use crate::util::config::NamingConfig;

pub const NAME: &str = "crttr";

/// The package descriptor of `crttr` under the default naming convention.
pub fn get_package() -> Package {
    get_package_with(&NamingConfig::default())
}

pub fn get_package_with(naming: &NamingConfig) -> Package {
    compose_package(NAME, &foundation::standard(naming), naming)
}
