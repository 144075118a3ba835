//! Generation plans.
//!
//! A GenerationPlan is the serializable form of a flattened package graph:
//! what a backend would emit build files for, in the order it would emit
//! them.

use serde::Serialize;

use crate::core::{Name, Package, Target, TargetKind};
use crate::generator::graph::PackageGraph;

/// Everything a backend needs to emit build files for one root package.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    /// Root package name
    pub root: Name,

    /// Structural fingerprint of the root package graph
    pub fingerprint: String,

    /// Operating system the output filenames are computed for
    pub os: String,

    /// Packages in dependency order
    pub packages: Vec<PackagePlan>,
}

/// One package in a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PackagePlan {
    pub name: Name,
    pub root: String,
    /// Names of direct sub-packages
    pub packages: Vec<Name>,
    pub targets: Vec<TargetPlan>,
}

/// One target in a plan.
#[derive(Debug, Clone, Serialize)]
pub struct TargetPlan {
    pub name: Name,
    pub kind: TargetKind,
    pub root: String,
    /// Names of dependency targets, in link order
    pub dependencies: Vec<Name>,
    /// Artifact file name
    pub output: String,
}

impl GenerationPlan {
    /// Build a plan from a flattened graph of `root`.
    pub fn new(root: &Package, graph: &PackageGraph, os: &str) -> Self {
        GenerationPlan {
            root: graph.root(),
            fingerprint: root.fingerprint(),
            os: os.to_string(),
            packages: graph
                .packages()
                .iter()
                .map(|p| PackagePlan::new(p, os))
                .collect(),
        }
    }

    /// Find a package in the plan.
    pub fn package(&self, name: &str) -> Option<&PackagePlan> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl PackagePlan {
    fn new(package: &Package, os: &str) -> Self {
        PackagePlan {
            name: package.name(),
            root: package.root().to_string(),
            packages: package.packages().iter().map(|p| p.name()).collect(),
            targets: package
                .targets()
                .into_iter()
                .map(|t| TargetPlan::new(t, os))
                .collect(),
        }
    }

    pub fn target(&self, name: &str) -> Option<&TargetPlan> {
        self.targets.iter().find(|t| t.name == name)
    }
}

impl TargetPlan {
    fn new(target: &Target, os: &str) -> Self {
        TargetPlan {
            name: target.name(),
            kind: target.kind(),
            root: target.root().to_string(),
            dependencies: target.dependencies().iter().map(|d| d.name()).collect(),
            output: target.output_filename(os),
        }
    }
}
