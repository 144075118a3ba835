//! Package composition.
//!
//! Every package of the crtti family has the same shape: a main library
//! linking against ccore, and a unit test linking against cunittest, ccore
//! and the main library. [`compose_package`] builds that shape for any name.

use std::sync::Arc;

use tracing::debug;

use crate::core::{Name, Package, Target};
use crate::util::config::NamingConfig;

/// Something that can produce a package descriptor graph on demand.
pub trait PackageProvider {
    fn get_package(&self) -> Package;
}

impl<F> PackageProvider for F
where
    F: Fn() -> Package,
{
    fn get_package(&self) -> Package {
        self()
    }
}

/// The foundational packages every package depends on.
///
/// Providers are invoked on every composition; nothing is cached here.
pub struct Foundation {
    unittest: Box<dyn PackageProvider>,
    core: Box<dyn PackageProvider>,
}

impl Foundation {
    pub fn new(
        unittest: impl PackageProvider + 'static,
        core: impl PackageProvider + 'static,
    ) -> Self {
        Foundation {
            unittest: Box::new(unittest),
            core: Box::new(core),
        }
    }

    /// Freshly composed unit-test framework package.
    pub fn unittest(&self) -> Package {
        self.unittest.get_package()
    }

    /// Freshly composed core utilities package.
    pub fn core(&self) -> Package {
        self.core.get_package()
    }
}

impl std::fmt::Debug for Foundation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Foundation").finish_non_exhaustive()
    }
}

/// Compose the package descriptor graph for `name`.
pub fn compose_package(name: &str, foundation: &Foundation, naming: &NamingConfig) -> Package {
    let unittest_pkg = Arc::new(foundation.unittest());
    let core_pkg = Arc::new(foundation.core());

    let name = Name::new(name);
    let root = naming.package_root(&name);
    debug!("composing package `{}` at `{}`", name, root);

    let package = Package::builder(name, root.as_str());

    let main_lib = Target::library(name, root.as_str())
        .dependency(core_pkg.main_lib())
        .build();

    let unittest = Target::test(name.test_name(), root)
        .dependency(unittest_pkg.main_lib())
        .dependency(core_pkg.main_lib())
        .dependency(&main_lib)
        .build();

    package
        .add_package(unittest_pkg)
        .add_package(core_pkg)
        .finish(main_lib, unittest)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::TargetKind;

    fn leaf(name: &'static str) -> impl Fn() -> Package {
        move || {
            let root = NamingConfig::default().package_root(name);
            let lib = Target::library(name, root.as_str()).build();
            let test = Target::test(format!("{}_test", name), root.as_str())
                .dependency(&lib)
                .build();
            Package::builder(name, root).finish(lib, test)
        }
    }

    fn foundation() -> Foundation {
        Foundation::new(leaf("cunittest"), leaf("ccore"))
    }

    fn dep_names(target: &Target) -> Vec<&'static str> {
        target.dependencies().iter().map(|d| d.name().as_str()).collect()
    }

    #[test]
    fn test_main_lib_depends_on_core_once() {
        let pkg = compose_package("crtti", &foundation(), &NamingConfig::default());

        let lib = pkg.main_lib();
        assert_eq!(lib.kind(), TargetKind::Library);
        assert_eq!(lib.name(), "crtti");
        assert_eq!(dep_names(lib), ["ccore"]);
        assert_eq!(lib.dependencies()[0], *pkg.package("ccore").unwrap().main_lib());
    }

    #[test]
    fn test_unittest_dependency_sequence() {
        let pkg = compose_package("anything", &foundation(), &NamingConfig::default());

        let test = pkg.unittest();
        assert_eq!(test.kind(), TargetKind::Test);
        assert_eq!(test.name(), "anything_test");
        assert_eq!(dep_names(test), ["cunittest", "ccore", "anything"]);
        assert!(Arc::ptr_eq(&test.dependencies()[2], pkg.main_lib()));
    }

    #[test]
    fn test_sub_packages_attached_in_order() {
        let pkg = compose_package("crttr", &foundation(), &NamingConfig::default());

        let names: Vec<&str> = pkg.packages().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, ["cunittest", "ccore"]);
        assert!(Arc::ptr_eq(
            &pkg.unittest().dependencies()[0],
            pkg.package("cunittest").unwrap().main_lib()
        ));
    }

    #[test]
    fn test_root_follows_naming_convention() {
        let naming = NamingConfig {
            host: Some("example.com".to_string()),
            organization: Some("team".to_string()),
            separator: Some("/".to_string()),
        };
        let pkg = compose_package("crtti", &foundation(), &naming);

        assert_eq!(pkg.root(), "example.com/team/crtti");
        assert_eq!(pkg.main_lib().root(), pkg.root());
        assert_eq!(pkg.unittest().root(), pkg.root());
    }

    #[test]
    fn test_composition_is_repeatable() {
        let foundation = foundation();
        let a = compose_package("crtti", &foundation, &NamingConfig::default());
        let b = compose_package("crtti", &foundation, &NamingConfig::default());

        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(a.main_lib(), b.main_lib()));
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_providers_called_on_every_composition() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let core = leaf("ccore");
        let foundation = Foundation::new(leaf("cunittest"), move || {
            counter.set(counter.get() + 1);
            core()
        });

        compose_package("crtti", &foundation, &NamingConfig::default());
        compose_package("crttr", &foundation, &NamingConfig::default());
        assert_eq!(calls.get(), 2);
    }
}
