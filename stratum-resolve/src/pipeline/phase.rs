//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the resolution pipeline.
///
/// Phases run in order and share one [`CompilationContext`]. Built-in phases:
/// - `BuildPhase` - normalizes the schema into a type graph
/// - `ValidatePhase` - runs lints over the graph
/// - `AnalyzePhase` - polymorphism analysis
/// - `AssemblePhase` - produces the resolved model
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues are
    /// recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()>;
}
