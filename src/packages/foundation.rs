//! Foundational packages: `cunittest` and `ccore`.
//!
//! These live in their own repositories; the descriptors here mirror what
//! their own package modules return so that this family's graphs are
//! complete.

use crate::core::{Name, Package, Target};
use crate::ops::compose::Foundation;
use crate::util::config::NamingConfig;

/// Name of the unit-test framework package.
pub const CUNITTEST: &str = "cunittest";

/// Name of the core utilities package.
pub const CCORE: &str = "ccore";

/// The unit-test framework. Its own test only needs its library.
pub fn cunittest(naming: &NamingConfig) -> Package {
    let name = Name::new(CUNITTEST);
    let root = naming.package_root(&name);

    let main_lib = Target::library(name, root.as_str()).build();
    let unittest = Target::test(name.test_name(), root.as_str())
        .dependency(&main_lib)
        .build();

    Package::builder(name, root).finish(main_lib, unittest)
}

/// The core utilities package, tested with cunittest.
pub fn ccore(naming: &NamingConfig) -> Package {
    let unittest_pkg = cunittest(naming);

    let name = Name::new(CCORE);
    let root = naming.package_root(&name);

    let main_lib = Target::library(name, root.as_str()).build();
    let unittest = Target::test(name.test_name(), root.as_str())
        .dependency(unittest_pkg.main_lib())
        .dependency(&main_lib)
        .build();

    Package::builder(name, root)
        .add_package(unittest_pkg)
        .finish(main_lib, unittest)
}

/// Providers for both foundational packages under one naming convention.
pub fn standard(naming: &NamingConfig) -> Foundation {
    let unittest_naming = naming.clone();
    let core_naming = naming.clone();
    Foundation::new(
        move || cunittest(&unittest_naming),
        move || ccore(&core_naming),
    )
}
