//! Package descriptors of the crtti family.
//!
//! `crtti` and `crttr` share one composer and differ only by name; the
//! foundational `ccore` and `cunittest` descriptors live in [`foundation`].

pub mod crtti;
pub mod crttr;
pub mod foundation;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::Package;
use crate::util::config::NamingConfig;

/// Requested a package this repository has no composer for.
#[derive(Debug, Error, Diagnostic)]
#[error("unknown package `{name}`")]
#[diagnostic(
    code(cpkg::packages::unknown),
    help("known packages are `crtti` and `crttr`")
)]
pub struct UnknownPackageError {
    pub name: String,
}

/// A package's composer, parameterized by naming convention.
pub type Composer = fn(&NamingConfig) -> Package;

/// Look up the composer of a known package.
pub fn composer(name: &str) -> Result<Composer, UnknownPackageError> {
    match name {
        crtti::NAME => Ok(crtti::get_package_with),
        crttr::NAME => Ok(crttr::get_package_with),
        _ => Err(UnknownPackageError {
            name: name.to_string(),
        }),
    }
}

/// Compose one of the known packages by name.
pub fn get_package(name: &str, naming: &NamingConfig) -> Result<Package, UnknownPackageError> {
    composer(name).map(|compose| compose(naming))
}
