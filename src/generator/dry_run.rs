//! A generator that writes nothing.
//!
//! DryRunGenerator validates the graph the same way a real backend has to,
//! and records each step with the plan it would emit from.

use std::fmt;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::{Name, Package};
use crate::generator::graph::PackageGraph;
use crate::generator::plan::GenerationPlan;
use crate::generator::Generator;

/// One step the generator was asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Init,
    GitIgnore,
    Embedded,
    ClangFormat,
    Generate(Name),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Init => write!(f, "init"),
            Step::GitIgnore => write!(f, "gitignore"),
            Step::Embedded => write!(f, "embedded"),
            Step::ClangFormat => write!(f, "clang-format"),
            Step::Generate(name) => write!(f, "generate {}", name),
        }
    }
}

/// Records generation steps instead of emitting files.
#[derive(Debug)]
pub struct DryRunGenerator {
    os: String,
    steps: Vec<Step>,
    plan: Option<GenerationPlan>,
}

impl DryRunGenerator {
    /// Create a dry-run generator computing artifact names for `os`.
    pub fn new(os: impl Into<String>) -> Self {
        DryRunGenerator {
            os: os.into(),
            steps: Vec::new(),
            plan: None,
        }
    }

    /// Create a dry-run generator for the host operating system.
    pub fn for_host() -> Self {
        Self::new(std::env::consts::OS)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The plan computed by the last `generate` call.
    pub fn plan(&self) -> Option<&GenerationPlan> {
        self.plan.as_ref()
    }
}

impl Generator for DryRunGenerator {
    fn init(&mut self) -> Result<bool> {
        self.steps.push(Step::Init);
        Ok(true)
    }

    fn generate_gitignore(&mut self) -> Result<()> {
        info!("would write .gitignore");
        self.steps.push(Step::GitIgnore);
        Ok(())
    }

    fn generate_embedded(&mut self) -> Result<()> {
        info!("would generate embedded resources");
        self.steps.push(Step::Embedded);
        Ok(())
    }

    fn generate_clang_format(&mut self) -> Result<()> {
        info!("would write .clang-format");
        self.steps.push(Step::ClangFormat);
        Ok(())
    }

    fn generate(&mut self, package: &Package) -> Result<()> {
        let graph = PackageGraph::flatten(package)
            .with_context(|| format!("cannot generate build files for `{}`", package.name()))?;
        let plan = GenerationPlan::new(package, &graph, &self.os);

        for pkg in &plan.packages {
            let targets: Vec<&str> = pkg.targets.iter().map(|t| t.output.as_str()).collect();
            info!("would generate `{}`: {}", pkg.name, targets.join(", "));
        }

        self.steps.push(Step::Generate(package.name()));
        self.plan = Some(plan);
        Ok(())
    }
}
