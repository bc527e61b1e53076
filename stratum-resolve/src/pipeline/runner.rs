//! Pipeline orchestrator.

use eyre::Result;
use stratum_core::BackendConfig;
use stratum_schema::Schema;
use tracing::debug;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{AnalyzePhase, AssemblePhase, BuildPhase, ValidatePhase},
};

/// The resolution pipeline orchestrator.
///
/// Runs the built-in phases (build, validate, analyze, assemble) followed by
/// any user phases, calling plugin hooks before and after each phase.
///
/// A pipeline holds no schema state, so one instance can serve several
/// backends, including from different threads.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::new());
/// let ctx = pipeline.run(&schema, &BackendConfig::java())?;
/// let model = ctx.model.expect("assembled");
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the default built-in phases.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the validate phase (e.g. to add or remove lints).
    pub fn validate_with(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a schema for one backend.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally: a schema or cycle error,
    /// or lint errors. No model is produced in that case.
    pub fn run<'a>(
        &self,
        schema: &'a Schema,
        config: &'a BackendConfig,
    ) -> Result<CompilationContext<'a>> {
        let mut ctx = CompilationContext::new(schema, config);

        // Built-in phases in execution order
        let builtin = [
            &BuildPhase as &dyn Phase,
            &self.validate,
            &AnalyzePhase,
            &AssemblePhase,
        ];
        for phase in builtin {
            self.run_phase(phase, &mut ctx)?;
        }

        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let phase_name = phase.name();
        debug!(phase = phase_name, backend = %ctx.config.name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
