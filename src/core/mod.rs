//! Core data structures.
//!
//! - Interned names (Name)
//! - Build targets (Target) and their builder
//! - Packages (Package) owning one library, one unit test and their
//!   dependency packages

pub mod name;
pub mod package;
pub mod target;

pub use name::Name;
pub use package::{Package, PackageBuilder};
pub use target::{Target, TargetBuilder, TargetKind};
