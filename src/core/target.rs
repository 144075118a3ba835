//! Target definitions - what gets built.
//!
//! A Target is either the main library of a package or its unit-test
//! executable. Targets are built once through a [`TargetBuilder`] and shared
//! behind an `Arc` from then on; dependents hold non-owning references to
//! the targets they link against.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::core::Name;

/// The kind of target being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Static library, the primary artifact of a package
    Library,

    /// Unit-test executable
    Test,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Library => "library",
            TargetKind::Test => "test",
        }
    }

    /// Get the typical file extension for this target kind.
    pub fn extension(&self, os: &str) -> &'static str {
        match self {
            TargetKind::Library => {
                if os == "windows" {
                    "lib"
                } else {
                    "a"
                }
            }
            TargetKind::Test => {
                if os == "windows" {
                    "exe"
                } else {
                    ""
                }
            }
        }
    }

    /// Get the output filename for a target of this kind.
    pub fn output_filename(&self, name: &str, os: &str) -> String {
        let prefix = match self {
            TargetKind::Library if os != "windows" => "lib",
            _ => "",
        };
        let ext = self.extension(os);
        if ext.is_empty() {
            format!("{}{}", prefix, name)
        } else {
            format!("{}{}.{}", prefix, name, ext)
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build target. Immutable once built.
///
/// Equality is structural: two targets are equal when their names, roots,
/// kinds and dependency sequences (in order) are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: Name,
    root: String,
    kind: TargetKind,
    dependencies: Vec<Arc<Target>>,
}

impl Target {
    /// Start building a target of the given kind.
    pub fn builder(name: impl Into<Name>, root: impl Into<String>, kind: TargetKind) -> TargetBuilder {
        TargetBuilder {
            name: name.into(),
            root: root.into(),
            kind,
            dependencies: Vec::new(),
        }
    }

    /// Start building a library target.
    pub fn library(name: impl Into<Name>, root: impl Into<String>) -> TargetBuilder {
        Self::builder(name, root, TargetKind::Library)
    }

    /// Start building a unit-test target.
    pub fn test(name: impl Into<Name>, root: impl Into<String>) -> TargetBuilder {
        Self::builder(name, root, TargetKind::Test)
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Dependencies in insertion order.
    pub fn dependencies(&self) -> &[Arc<Target>] {
        &self.dependencies
    }

    /// Check whether `other` is a direct dependency.
    pub fn depends_on(&self, other: &Target) -> bool {
        self.dependencies.iter().any(|dep| dep.as_ref() == other)
    }

    /// Check whether `other` is reachable through the dependency edges.
    pub fn reaches(&self, other: &Target) -> bool {
        let mut stack: Vec<&Target> = self.dependencies.iter().map(|d| d.as_ref()).collect();
        while let Some(target) = stack.pop() {
            if target == other {
                return true;
            }
            stack.extend(target.dependencies.iter().map(|d| d.as_ref()));
        }
        false
    }

    /// Get the output filename for this target.
    pub fn output_filename(&self, os: &str) -> String {
        self.kind.output_filename(&self.name, os)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Accumulates the dependencies of a target before it is frozen.
#[derive(Debug, Clone)]
pub struct TargetBuilder {
    name: Name,
    root: String,
    kind: TargetKind,
    dependencies: Vec<Arc<Target>>,
}

impl TargetBuilder {
    /// Append one dependency.
    pub fn dependency(mut self, target: &Arc<Target>) -> Self {
        self.dependencies.push(Arc::clone(target));
        self
    }

    /// Append several dependencies, keeping their order.
    pub fn dependencies<'a>(mut self, targets: impl IntoIterator<Item = &'a Arc<Target>>) -> Self {
        self.dependencies.extend(targets.into_iter().map(Arc::clone));
        self
    }

    pub fn build(self) -> Arc<Target> {
        Arc::new(Target {
            name: self.name,
            root: self.root,
            kind: self.kind,
            dependencies: self.dependencies,
        })
    }
}
