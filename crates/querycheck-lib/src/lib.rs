//! Querycheck: compile-time validation of entity query strings.
//!
//! Reconstructs persistence metadata from static type declarations, expands
//! shorthand query calls, checks parameter bindings, and maps every finding
//! back to the query literal it came from.
//!
//! # Example
//!
//! ```
//! use querycheck_core::DynamicTypeModel;
//! use querycheck_lib::analyzer::{DiagnosticSink, MetadataLookup, SemanticAnalyzer};
//! use querycheck_lib::{CallSite, CheckConfig, ParameterBindings, QueryChecker};
//!
//! struct NoopAnalyzer;
//!
//! impl SemanticAnalyzer for NoopAnalyzer {
//!     fn analyze(&mut self, _: &str, _: &mut dyn MetadataLookup, _: &mut dyn DiagnosticSink) {}
//! }
//!
//! let types = DynamicTypeModel::from_json(
//!     r#"[{"name": "app.Person", "annotations": [{"name": "Entity"}],
//!          "members": [{"name": "name", "type": "String"}]}]"#,
//! )
//! .unwrap();
//!
//! let mut checker = QueryChecker::new(&types, NoopAnalyzer, CheckConfig::default());
//! let site = CallSite::shorthand("find", "Person", Some("name"))
//!     .bindings(ParameterBindings::named(["name", "age"]));
//! let diagnostics = checker.check(&site);
//! assert_eq!(diagnostics.len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyzer;
pub mod check;
pub mod config;
pub mod diagnostics;
pub mod metadata;
pub mod params;
pub mod remap;
pub mod shorthand;

#[cfg(test)]
mod params_tests;
#[cfg(test)]
mod test_utils;

pub use check::{CallSite, QueryChecker};
pub use config::CheckConfig;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use metadata::MetadataGraph;
pub use params::ParameterBindings;
pub use remap::{LiteralOrigin, remap};

/// Errors from loading declarations or call sites.
///
/// Resolution and expansion failures are not errors: they come back as
/// `None` or as diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Types(#[from] querycheck_core::Error),

    #[error("invalid call sites: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownVerb(#[from] shorthand::UnknownVerb),
}

pub type Result<T> = std::result::Result<T, Error>;
