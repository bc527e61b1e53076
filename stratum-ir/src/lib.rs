//! Resolved type model for the stratum resolver.
//!
//! This crate provides the records that code emitters consume once type
//! resolution has finished. They are the single hand-off point between the
//! resolver and any output ecosystem.
//!
//! # Architecture
//!
//! ```text
//! schema (TOML/JSON) → stratum-schema → stratum-resolve → stratum-ir → emitters
//! ```
//!
//! The model types are designed to be:
//! - Backend-agnostic (primitive names are whatever the injected table said)
//! - Immutable after assembly (emitters only read)
//! - Serializable, so out-of-process emitters can consume them as JSON

mod model;
mod types;

pub use model::{
    DeserializerSpec, EnumLiteral, EnumMember, ResolvedClass, ResolvedEnum, ResolvedField,
    ResolvedModel,
};
pub use types::TargetType;
