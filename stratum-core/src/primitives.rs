//! Primitive lookup tables mapping schema scalar keywords to backend types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lookup capability for a backend's primitive types.
///
/// The resolver only ever asks whether a declared type text is a primitive
/// of the current backend. Implement this trait to plug in a table that is
/// not a plain map (e.g. one backed by a template engine's registry).
pub trait PrimitiveTable {
    /// Map a declared type text (e.g. `"integer"`) to a backend primitive
    /// name, or `None` if the backend has no primitive for it.
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// Ordered primitive table, deserializable from a TOML table.
///
/// ```toml
/// [primitives]
/// string = "String"
/// integer = "Integer"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveMap {
    entries: IndexMap<String, String>,
}

impl PrimitiveMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, keyword: impl Into<String>, primitive: impl Into<String>) {
        self.entries.insert(keyword.into(), primitive.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, keyword: impl Into<String>, primitive: impl Into<String>) -> Self {
        self.insert(keyword, primitive);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Primitive table of the Java backend.
    pub fn java() -> Self {
        Self::new()
            .with("string", "String")
            // not dealing with floats here
            .with("integer", "Integer")
            .with("number", "Integer")
            .with("boolean", "Boolean")
            .with("datetime", "Instant")
            .with("object", "Map<String, Object>")
            .with("UUID", "UUID")
    }

    /// Primitive table of the Python backend.
    pub fn python() -> Self {
        Self::new()
            .with("string", "str")
            .with("integer", "int")
            .with("number", "float")
            .with("boolean", "bool")
            .with("datetime", "datetime")
            .with("date-only", "date")
            .with("object", "dict")
    }
}

impl PrimitiveTable for PrimitiveMap {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrimitiveMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
