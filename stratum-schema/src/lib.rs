// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod resource;
mod schema;
mod serde_helpers;
mod types;

pub use error::{Error, Result, SourceContext};
pub use resource::{Method, Resource};
pub use schema::{ParseContext, Schema, SchemaFormat, parse_schema};
pub use types::{EnumLiteral, PropertyDecl, TypeDecl};

/// Parse a schema file from the given path
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Schema> {
    Schema::from_file(path)
}

/// Parse a TOML schema from a string (uses "api.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Schema> {
    content.parse()
}
