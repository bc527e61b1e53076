//! Pipeline snapshot plugin for debugging.
//!
//! Captures the pipeline state after each phase so the intermediate results
//! of a run can be inspected as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::{Result, WrapErr};
use serde::Serialize;
use stratum_ir::ResolvedModel;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::{graph::GraphSummary, polymorphism::PolymorphismAnalysis};

/// The pipeline state after a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Type graph overview (available after "build").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphSummary>,

    /// Polymorphism analysis (available after "analyze").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PolymorphismAnalysis>,

    /// Resolved model (available after "assemble").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ResolvedModel>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir("target/stratum-debug"));
/// pipeline.run(&schema, &config)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Written to after every phase when set.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes each snapshot as it is captured.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// All collected snapshots, in phase order.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir` as `<phase>.json`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for snapshot in self.snapshots() {
            write_snapshot(dir, &snapshot)?;
        }
        Ok(())
    }

    fn capture(&self, phase: &str, ctx: &CompilationContext<'_>) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            graph: ctx.graph.as_ref().map(|g| g.summary()),
            analysis: ctx.analysis.clone(),
            model: ctx.model.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
        snapshot
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create snapshot directory {}", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let snapshot = self.capture(phase, ctx);
        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }
        Ok(())
    }
}
