//! Core utilities and types for the stratum type resolver.
//!
//! This crate provides the backend configuration that is injected into a
//! resolution run: the primitive lookup table of an output ecosystem, its
//! annotation style and a few naming conventions. Nothing here knows how
//! types are resolved.

mod config;
mod primitives;
mod utils;

pub use config::{BackendConfig, RequiredOverrideMode};
pub use primitives::{PrimitiveMap, PrimitiveTable};
// String utilities
pub use utils::{capitalize, sanitize_identifier};
