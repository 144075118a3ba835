//! The generator boundary.
//!
//! A generator turns a finished package graph into build files and the
//! auxiliary project files around them. This crate only composes graphs;
//! [`run`] drives any [`Generator`] through the fixed sequence, and
//! [`DryRunGenerator`] reports what a backend would be asked to do.

pub mod dry_run;
pub mod error;
pub mod graph;
pub mod plan;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::Package;
use crate::util::config::GenerateConfig;

pub use dry_run::DryRunGenerator;
pub use error::GraphError;
pub use graph::PackageGraph;
pub use plan::GenerationPlan;

/// A build-file generator backend.
pub trait Generator {
    /// Prepare the backend. Returning `false` skips generation entirely.
    fn init(&mut self) -> Result<bool>;

    fn generate_gitignore(&mut self) -> Result<()>;

    fn generate_embedded(&mut self) -> Result<()>;

    fn generate_clang_format(&mut self) -> Result<()>;

    /// Emit build files for the package graph.
    fn generate(&mut self, package: &Package) -> Result<()>;
}

/// Run a generator over the package produced by `compose`.
///
/// Composition happens only after `init` succeeds. Returns whether
/// generation ran.
pub fn run<G, F>(generator: &mut G, config: &GenerateConfig, compose: F) -> Result<bool>
where
    G: Generator + ?Sized,
    F: FnOnce() -> Package,
{
    if !generator.init()? {
        info!("generator declined to run");
        return Ok(false);
    }

    if config.gitignore() {
        generator.generate_gitignore()?;
    } else {
        debug!("skipping .gitignore");
    }

    if config.embedded() {
        generator.generate_embedded()?;
    } else {
        debug!("skipping embedded resources");
    }

    if config.clang_format() {
        generator.generate_clang_format()?;
    } else {
        debug!("skipping .clang-format");
    }

    let package = compose();
    generator.generate(&package)?;

    Ok(true)
}
