//! Build phase - normalizes the schema into a type graph.

use eyre::Result;
use tracing::debug;

use crate::{
    graph::TypeGraph,
    pipeline::{CompilationContext, Phase},
};

/// Phase that builds the [`TypeGraph`] from the schema's declarations.
pub struct BuildPhase;

impl Phase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    fn description(&self) -> &'static str {
        "Normalize type declarations into a type graph"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let graph = TypeGraph::from_schema(ctx.schema)?;
        debug!(types = graph.len(), payloads = graph.payloads().len(), "build phase done");
        ctx.graph = Some(graph);
        Ok(())
    }
}
