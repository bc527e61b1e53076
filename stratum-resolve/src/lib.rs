//! Type resolution and polymorphism analysis for schema-driven code generators.
//!
//! This crate turns the loosely typed declarations of a
//! [`stratum_schema::Schema`] into the backend-agnostic
//! [`stratum_ir::ResolvedModel`] that code emitters consume.
//!
//! # Module Organization
//!
//! - [`graph`] - Type graph built from schema declarations ([`TypeGraph`], [`TypeExpr`])
//! - [`hierarchy`] - Ancestor chains, property flattening, member detection
//! - [`ancestor`] - Nearest common ancestor of union members
//! - [`mapper`] - Declared type → [`stratum_ir::TargetType`] mapping
//! - [`polymorphism`] - Abstract types and discriminant-dispatch deserializers
//! - [`assembler`] - Per-type resolved records ([`Resolver`])
//! - [`pipeline`] - Phase pipeline with plugins and diagnostics
//! - [`display`] - Text rendering of a resolved model

pub mod ancestor;
pub mod assembler;
pub mod display;
pub mod enums;
mod error;
pub mod graph;
pub mod hierarchy;
pub mod mapper;
pub mod pipeline;
pub mod polymorphism;

pub use assembler::{DroppedField, Resolution, Resolver};
pub use display::{DisplayStyle, ModelDisplay};
pub use error::{Error, Result};
pub use graph::{TypeExpr, TypeGraph};
pub use mapper::FieldError;
pub use polymorphism::PolymorphismAnalysis;
use stratum_core::BackendConfig;
use stratum_schema::Schema;

/// Resolve a schema for one backend without running the pipeline.
///
/// Lints are not run; dropped fields are returned in the [`Resolution`].
///
/// # Errors
///
/// Returns [`Error::Schema`] for malformed declarations or clashing enum
/// names and [`Error::Cycle`] for inheritance cycles.
pub fn resolve(schema: &Schema, config: &BackendConfig) -> Result<Resolution> {
    let graph = TypeGraph::from_schema(schema)?;
    let analysis = PolymorphismAnalysis::analyze(&graph, config);
    let resolver = Resolver::new(&graph, &analysis, config)?;
    Ok(resolver.resolve())
}
