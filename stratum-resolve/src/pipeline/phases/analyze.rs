//! Analyze phase - polymorphism analysis over the type graph.

use eyre::Result;

use crate::{
    pipeline::{CompilationContext, Phase},
    polymorphism::PolymorphismAnalysis,
};

/// Phase that decides which types are abstract and which need a
/// discriminant-based deserializer.
///
/// Must run after `BuildPhase`.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Find abstract types and polymorphic deserializers"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let analysis = PolymorphismAnalysis::analyze(ctx.graph()?, ctx.config);
        ctx.analysis = Some(analysis);
        Ok(())
    }
}
