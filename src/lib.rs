//! Package descriptors for the crtti family of native libraries.
//!
//! This crate composes in-memory descriptor graphs (packages, library and
//! unit-test targets, and the dependency edges between them) and hands them
//! to a build-file generator. It never emits files itself.

pub mod core;
pub mod generator;
pub mod ops;
pub mod packages;
pub mod util;

pub use crate::core::{
    name::Name,
    package::{Package, PackageBuilder},
    target::{Target, TargetBuilder, TargetKind},
};

pub use crate::generator::{Generator, PackageGraph};
pub use crate::ops::compose::{compose_package, Foundation, PackageProvider};
pub use crate::util::config::Config;
