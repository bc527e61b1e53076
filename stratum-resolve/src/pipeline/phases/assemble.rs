//! Assemble phase - produces the resolved model.

use eyre::Result;
use tracing::debug;

use crate::{
    assembler::Resolver,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that resolves every type into the [`stratum_ir::ResolvedModel`].
///
/// Must run after `BuildPhase` and `AnalyzePhase`. Dropped fields are
/// recorded as warnings.
pub struct AssemblePhase;

impl Phase for AssemblePhase {
    fn name(&self) -> &'static str {
        "assemble"
    }

    fn description(&self) -> &'static str {
        "Resolve every type into the backend-agnostic model"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let resolution = {
            let resolver = Resolver::new(ctx.graph()?, ctx.analysis()?, ctx.config)?;
            resolver.resolve()
        };

        for dropped in &resolution.dropped {
            ctx.add_diagnostic(Diagnostic::dropped_field(self.name(), dropped));
        }
        debug!(
            classes = resolution.model.len(),
            enums = resolution.model.enums.len(),
            dropped = resolution.dropped.len(),
            "assemble phase done"
        );
        ctx.model = Some(resolution.model);
        Ok(())
    }
}
