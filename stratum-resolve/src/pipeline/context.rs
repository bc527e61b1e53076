//! State passed through pipeline phases.

use eyre::{Result, eyre};
use stratum_core::BackendConfig;
use stratum_ir::ResolvedModel;
use stratum_schema::Schema;

use super::diagnostic::{Diagnostic, Severity};
use crate::{graph::TypeGraph, polymorphism::PolymorphismAnalysis};

/// Context passed through all pipeline phases.
///
/// Borrows the schema snapshot and the backend configuration; everything the
/// phases compute is owned by the context.
#[derive(Debug)]
pub struct CompilationContext<'a> {
    pub schema: &'a Schema,
    pub config: &'a BackendConfig,
    /// Populated by BuildPhase.
    pub graph: Option<TypeGraph>,
    /// Populated by AnalyzePhase.
    pub analysis: Option<PolymorphismAnalysis>,
    /// Populated by AssemblePhase.
    pub model: Option<ResolvedModel>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CompilationContext<'a> {
    pub fn new(schema: &'a Schema, config: &'a BackendConfig) -> Self {
        Self {
            schema,
            config,
            graph: None,
            analysis: None,
            model: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// The type graph, or an error if BuildPhase has not run.
    pub fn graph(&self) -> Result<&TypeGraph> {
        self.graph
            .as_ref()
            .ok_or_else(|| eyre!("type graph not set - did BuildPhase run?"))
    }

    /// The polymorphism analysis, or an error if AnalyzePhase has not run.
    pub fn analysis(&self) -> Result<&PolymorphismAnalysis> {
        self.analysis
            .as_ref()
            .ok_or_else(|| eyre!("analysis not set - did AnalyzePhase run?"))
    }

    /// Take the resolved model out of the context.
    pub fn take_model(&mut self) -> Result<ResolvedModel> {
        self.model
            .take()
            .ok_or_else(|| eyre!("model not set - did AssemblePhase run?"))
    }
}
