//! Flattening a package graph for generation.
//!
//! Composers never share work, so the same foundational package shows up
//! once per dependent. The generator deduplicates by name here, after
//! checking that every occurrence describes the same graph.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::DfsPostOrder;
use tracing::{debug, trace};

use crate::core::{Name, Package, Target, TargetKind};
use crate::generator::error::GraphError;

/// A deduplicated package graph in dependency order.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    root: Name,
    packages: Vec<Arc<Package>>,
}

impl PackageGraph {
    /// Flatten and validate the graph below `root`.
    pub fn flatten(root: &Package) -> Result<Self, GraphError> {
        let mut collector = Collector::default();
        let root_index = collector.visit(&Arc::new(root.clone()))?;

        // Built packages are immutable, so the graph is acyclic and a
        // post-order walk from the root emits every dependency first.
        let mut packages = Vec::with_capacity(collector.packages.len());
        let mut dfs = DfsPostOrder::new(&collector.graph, root_index);
        while let Some(index) = dfs.next(&collector.graph) {
            packages.push(Arc::clone(&collector.packages[&collector.graph[index]]));
        }

        for package in &packages {
            validate_package(package)?;
        }
        check_targets(&packages)?;

        debug!(
            "flattened `{}` into {} packages",
            collector.graph[root_index],
            packages.len()
        );

        Ok(PackageGraph {
            root: root.name(),
            packages,
        })
    }

    /// Name of the package the graph was flattened from.
    pub fn root(&self) -> Name {
        self.root
    }

    /// Every distinct package, dependencies before dependents.
    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }
}

#[derive(Default)]
struct Collector {
    graph: DiGraph<Name, ()>,
    indices: HashMap<Name, NodeIndex>,
    packages: HashMap<Name, Arc<Package>>,
}

impl Collector {
    fn visit(&mut self, package: &Arc<Package>) -> Result<NodeIndex, GraphError> {
        let name = package.name();

        if let Some(seen) = self.packages.get(&name) {
            if seen.as_ref() != package.as_ref() {
                return Err(GraphError::ConflictingPackage {
                    name: name.to_string(),
                    first_root: seen.root().to_string(),
                    second_root: package.root().to_string(),
                });
            }
            trace!("skipping duplicate of `{}`", name);
            return Ok(self.indices[&name]);
        }

        let index = self.graph.add_node(name);
        self.indices.insert(name, index);
        self.packages.insert(name, Arc::clone(package));

        for sub in package.packages() {
            let sub_index = self.visit(sub)?;
            self.graph.add_edge(index, sub_index, ());
        }

        Ok(index)
    }
}

fn validate_package(package: &Package) -> Result<(), GraphError> {
    let main_lib = package.main_lib();
    let unittest = package.unittest();

    expect_kind(package, main_lib, TargetKind::Library)?;
    expect_kind(package, unittest, TargetKind::Test)?;

    let libraries = std::iter::once(main_lib).chain(package.packages().iter().map(|p| p.main_lib()));
    for library in libraries {
        if !unittest.reaches(library) {
            return Err(GraphError::MissingTestDependency {
                package: package.name().to_string(),
                test: unittest.name().to_string(),
                library: library.name().to_string(),
            });
        }
    }

    Ok(())
}

fn expect_kind(package: &Package, target: &Target, expected: TargetKind) -> Result<(), GraphError> {
    if target.kind() == expected {
        return Ok(());
    }
    Err(GraphError::WrongTargetKind {
        package: package.name().to_string(),
        target: target.name().to_string(),
        expected: expected.as_str(),
        found: target.kind().as_str(),
    })
}

/// Target names are global in generated build files.
fn check_targets(packages: &[Arc<Package>]) -> Result<(), GraphError> {
    let mut owners: HashMap<Name, (&Package, &Target)> = HashMap::new();

    for package in packages {
        for target in package.targets() {
            match owners.get(&target.name()) {
                Some((owner, existing)) if *existing != target.as_ref() => {
                    return Err(GraphError::ConflictingTarget {
                        name: target.name().to_string(),
                        first: owner.name().to_string(),
                        second: package.name().to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(target.name(), (package.as_ref(), target.as_ref()));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::{crtti, crttr};

    fn names(graph: &PackageGraph) -> Vec<&'static str> {
        graph.packages().iter().map(|p| p.name().as_str()).collect()
    }

    fn leaf(name: &str, root: &str) -> Package {
        let lib = Target::library(name, root).build();
        let test = Target::test(format!("{}_test", name), root)
            .dependency(&lib)
            .build();
        Package::builder(name, root).finish(lib, test)
    }

    #[test]
    fn test_flatten_deduplicates_by_name() {
        let graph = PackageGraph::flatten(&crtti::get_package()).unwrap();

        // cunittest is reachable both directly and through ccore.
        assert_eq!(graph.packages().len(), 3);
        assert_eq!(names(&graph), ["cunittest", "ccore", "crtti"]);
        assert_eq!(graph.root(), "crtti");
    }

    #[test]
    fn test_flatten_orders_dependencies_first() {
        let graph = PackageGraph::flatten(&crttr::get_package()).unwrap();

        let position = |name: &str| graph.packages().iter().position(|p| p.name() == name);
        assert!(position("cunittest") < position("ccore"));
        assert!(position("ccore") < position("crttr"));
        assert_eq!(position("crttr"), Some(2));
        assert_eq!(position("crtti"), None);
    }

    #[test]
    fn test_shared_dependency_ordered_before_every_dependent() {
        let base = leaf("base", "b");
        let mid = {
            let lib = Target::library("mid", "m").build();
            let test = Target::test("mid_test", "m")
                .dependency(base.main_lib())
                .dependency(&lib)
                .build();
            Package::builder("mid", "m").add_package(base.clone()).finish(lib, test)
        };
        let top = {
            let lib = Target::library("top", "t").build();
            let test = Target::test("top_test", "t")
                .dependency(base.main_lib())
                .dependency(mid.main_lib())
                .dependency(&lib)
                .build();
            Package::builder("top", "t")
                .add_package(base.clone())
                .add_package(mid.clone())
                .finish(lib, test)
        };
        let lib = Target::library("app", "a").build();
        let test = Target::test("app_test", "a")
            .dependency(mid.main_lib())
            .dependency(top.main_lib())
            .dependency(&lib)
            .build();
        let app = Package::builder("app", "a")
            .add_package(mid)
            .add_package(top)
            .finish(lib, test);

        let graph = PackageGraph::flatten(&app).unwrap();
        let order = names(&graph);
        let position = |name: &str| order.iter().position(|n| *n == name).unwrap();

        assert_eq!(order.len(), 4);
        assert_eq!(position("base"), 0);
        assert!(position("mid") < position("top"));
        assert_eq!(order.last(), Some(&"app"));
    }

    #[test]
    fn test_conflicting_package_rejected() {
        let one = leaf("dep", "here");
        let two = leaf("dep", "there");

        let middle = {
            let lib = Target::library("middle", "m").build();
            let test = Target::test("middle_test", "m")
                .dependency(&lib)
                .dependency(two.main_lib())
                .build();
            Package::builder("middle", "m").add_package(two).finish(lib, test)
        };

        let lib = Target::library("app", "a").build();
        let test = Target::test("app_test", "a")
            .dependency(one.main_lib())
            .dependency(middle.main_lib())
            .dependency(&lib)
            .build();
        let app = Package::builder("app", "a")
            .add_package(one)
            .add_package(middle)
            .finish(lib, test);

        let err = PackageGraph::flatten(&app).unwrap_err();
        assert!(matches!(err, GraphError::ConflictingPackage { ref name, .. } if name == "dep"));
    }

    #[test]
    fn test_missing_own_library_rejected() {
        let root = "r";
        let lib = Target::library("lonely", root).build();
        let test = Target::test("lonely_test", root).build();
        let pkg = Package::builder("lonely", root).finish(lib, test);

        let err = PackageGraph::flatten(&pkg).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MissingTestDependency { ref library, .. } if library == "lonely"
        ));
    }

    #[test]
    fn test_missing_sub_package_library_rejected() {
        let dep = leaf("dep", "d");
        let lib = Target::library("app", "a").build();
        let test = Target::test("app_test", "a").dependency(&lib).build();
        let pkg = Package::builder("app", "a").add_package(dep).finish(lib, test);

        let err = PackageGraph::flatten(&pkg).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MissingTestDependency { ref library, .. } if library == "dep"
        ));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let lib = Target::test("odd", "o").build();
        let test = Target::test("odd_test", "o").dependency(&lib).build();
        let pkg = Package::builder("odd", "o").finish(lib, test);

        let err = PackageGraph::flatten(&pkg).unwrap_err();
        assert!(matches!(err, GraphError::WrongTargetKind { expected: "library", .. }));
    }

    #[test]
    fn test_conflicting_target_rejected() {
        let dep = leaf("dep", "d");
        let lib = Target::library("dep", "a").build();
        let test = Target::test("app_test", "a")
            .dependency(&lib)
            .dependency(dep.main_lib())
            .build();
        let pkg = Package::builder("app", "a").add_package(dep).finish(lib, test);

        let err = PackageGraph::flatten(&pkg).unwrap_err();
        assert!(matches!(err, GraphError::ConflictingTarget { ref name, .. } if name == "dep"));
    }
}
