//! Resolution pipeline.
//!
//! The [`Pipeline`] drives a schema through explicit phases
//! (build → validate → analyze → assemble) and provides:
//!
//! - Plugin hooks before and after each phase
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use stratum_resolve::pipeline::{Pipeline, Severity};
//!
//! let ctx = Pipeline::new().run(&schema, &BackendConfig::java())?;
//!
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("warning: {}", diag.message);
//!     }
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
