//! Validate phase - runs lints over the type graph.

mod lint;
pub mod lints;

use eyre::{Report, Result, eyre};
pub use lint::Lint;
pub use lints::{
    DuplicateEnumLint, EnumCollisionLint, InheritanceCycleLint, UnresolvedReferenceLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the type graph using configurable lints.
///
/// Any error diagnostic aborts the pipeline; warnings and info are kept. The
/// returned report wraps the first typed [`crate::Error`] behind an error
/// diagnostic, so callers can `downcast_ref` it.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(InheritanceCycleLint),
                Box::new(DuplicateEnumLint),
                Box::new(UnresolvedReferenceLint),
                Box::new(EnumCollisionLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check graph integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let mut diagnostics = Vec::new();
        {
            let graph = ctx.graph()?;
            for lint in &self.lints {
                lint.check(graph, ctx.config, &mut diagnostics);
            }
        }
        ctx.diagnostics.extend(diagnostics);

        if ctx.has_errors() {
            let summary = format!("validation failed with {} error(s)", ctx.error_count());
            return Err(match ctx.errors().find_map(|d| d.cause.clone()) {
                Some(cause) => Report::new(cause).wrap_err(summary),
                None => eyre!(summary),
            });
        }
        Ok(())
    }
}
