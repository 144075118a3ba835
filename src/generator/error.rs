//! Errors detected when a package graph is handed to a generator.

use miette::Diagnostic;
use thiserror::Error;

/// A package graph a generator cannot consume.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("package `{name}` appears twice with different contents")]
    #[diagnostic(
        code(cpkg::graph::conflicting_package),
        help("every package name must describe the same graph everywhere it is referenced")
    )]
    ConflictingPackage {
        name: String,
        first_root: String,
        second_root: String,
    },

    #[error("target `{name}` is defined differently by `{first}` and `{second}`")]
    #[diagnostic(code(cpkg::graph::conflicting_target))]
    ConflictingTarget {
        name: String,
        first: String,
        second: String,
    },

    #[error("`{target}` of package `{package}` is a {found} target, expected {expected}")]
    #[diagnostic(code(cpkg::graph::wrong_kind))]
    WrongTargetKind {
        package: String,
        target: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unit test `{test}` of package `{package}` does not link `{library}`")]
    #[diagnostic(
        code(cpkg::graph::missing_test_dependency),
        help("a unit test must depend on its own library and the libraries of every package it depends on")
    )]
    MissingTestDependency {
        package: String,
        test: String,
        library: String,
    },
}
