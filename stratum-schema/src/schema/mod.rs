//! Schema root and parsing entry points.

mod parse;
mod validate;

use indexmap::IndexMap;
use serde::Deserialize;
pub use parse::{SchemaFormat, parse_schema};
pub use validate::ParseContext;

use crate::{Resource, TypeDecl};

/// Root of a schema document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// API title
    #[serde(default)]
    pub title: Option<String>,

    /// API version
    #[serde(default)]
    pub version: Option<String>,

    /// Declared types, in document order
    #[serde(default)]
    pub types: IndexMap<String, TypeDecl>,

    /// Top-level resources keyed by URI
    #[serde(default)]
    pub resources: IndexMap<String, Resource>,
}

impl Schema {
    /// Check if a type is declared.
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Every request/response payload type expression in the resource tree.
    pub fn payload_types(&self) -> Vec<&str> {
        let mut payloads = Vec::new();
        for (uri, resource) in &self.resources {
            resource.walk(uri, &mut |_, node| {
                for method in node.methods.values() {
                    payloads.extend(method.payloads());
                }
            });
        }
        payloads
    }
}
