//! Package - a named bundle of one library, one unit test and the packages
//! it depends on.

use std::fmt;
use std::sync::Arc;

use crate::core::{Name, Target};
use crate::util::hash::Fingerprint;

/// A package descriptor graph.
///
/// Equality is structural, like [`Target`]: two independently composed
/// packages with the same shape compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: Name,
    root: String,
    packages: Vec<Arc<Package>>,
    main_lib: Arc<Target>,
    unittest: Arc<Target>,
}

impl Package {
    /// Start building a package.
    pub fn builder(name: impl Into<Name>, root: impl Into<String>) -> PackageBuilder {
        PackageBuilder {
            name: name.into(),
            root: root.into(),
            packages: Vec::new(),
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Direct sub-packages in the order they were attached.
    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }

    /// Find a direct sub-package by name.
    pub fn package(&self, name: &str) -> Option<&Arc<Package>> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// The main library target.
    pub fn main_lib(&self) -> &Arc<Target> {
        &self.main_lib
    }

    /// The unit-test target.
    pub fn unittest(&self) -> &Arc<Target> {
        &self.unittest
    }

    /// Both targets, main library first.
    pub fn targets(&self) -> [&Arc<Target>; 2] {
        [&self.main_lib, &self.unittest]
    }

    /// Structural fingerprint of the whole graph below this package.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        hash_package(&mut fp, self);
        fp.finish()
    }
}

fn hash_package(fp: &mut Fingerprint, package: &Package) {
    fp.update_str("package")
        .update_str(&package.name)
        .update_str(&package.root);
    hash_target(fp, &package.main_lib);
    hash_target(fp, &package.unittest);
    fp.update_count(package.packages.len());
    for sub in &package.packages {
        hash_package(fp, sub);
    }
}

fn hash_target(fp: &mut Fingerprint, target: &Target) {
    fp.update_str("target")
        .update_str(&target.name())
        .update_str(target.root())
        .update_str(target.kind().as_str())
        .update_count(target.dependencies().len());
    for dep in target.dependencies() {
        hash_target(fp, dep);
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.root)
    }
}

/// Collects sub-packages until the package's two targets are attached.
///
/// A package cannot exist without its main library and unit test, so
/// [`PackageBuilder::finish`] takes both and is the only way out.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    name: Name,
    root: String,
    packages: Vec<Arc<Package>>,
}

impl PackageBuilder {
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Attach a dependency package.
    pub fn add_package(mut self, package: impl Into<Arc<Package>>) -> Self {
        self.packages.push(package.into());
        self
    }

    /// Attach the main library and unit test, producing the package.
    pub fn finish(self, main_lib: Arc<Target>, unittest: Arc<Target>) -> Package {
        Package {
            name: self.name,
            root: self.root,
            packages: self.packages,
            main_lib,
            unittest,
        }
    }
}
