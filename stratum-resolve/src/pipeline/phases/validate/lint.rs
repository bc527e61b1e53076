//! Lint trait for type graph validation.

use stratum_core::BackendConfig;

use crate::{graph::TypeGraph, pipeline::Diagnostic};

/// A lint that checks the type graph for issues.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the graph and add any diagnostics.
    fn check(&self, graph: &TypeGraph, config: &BackendConfig, diagnostics: &mut Vec<Diagnostic>);
}
