//! Pipeline plugin trait.

use eyre::Result;

use super::CompilationContext;

/// A plugin that hooks into the resolution pipeline.
///
/// Plugins are called before and after each phase and may inspect or modify
/// the context. Returning an error aborts the run.
///
/// # Example
///
/// ```ignore
/// struct ModelSizePlugin;
///
/// impl Plugin for ModelSizePlugin {
///     fn name(&self) -> &'static str { "model-size" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
///         if let Some(model) = &ctx.model {
///             println!("{}: {} classes", phase, model.len());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        Ok(())
    }
}
