//! High-level operations.

pub mod compose;

pub use compose::{compose_package, Foundation, PackageProvider};
