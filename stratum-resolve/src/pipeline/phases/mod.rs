//! Built-in pipeline phases.
//!
//! - [`BuildPhase`] - normalizes the schema into a type graph
//! - [`ValidatePhase`] - runs lints over the graph
//! - [`AnalyzePhase`] - decides abstract types and deserializers
//! - [`AssemblePhase`] - produces the resolved model

mod analyze;
mod assemble;
mod build;
mod validate;

pub use analyze::AnalyzePhase;
pub use assemble::AssemblePhase;
pub use build::BuildPhase;
pub use validate::{
    DuplicateEnumLint, EnumCollisionLint, InheritanceCycleLint, Lint, UnresolvedReferenceLint,
    ValidatePhase,
};
