//! Resource tree: endpoints with methods carrying payload type references.

use indexmap::IndexMap;
use serde::Deserialize;

/// A resource node (e.g. `/animals`), possibly with nested resources.
///
/// ```toml
/// [resources."/animals".methods.post]
/// body = "Cat"
/// responses = { "201" = "Cat" }
///
/// [resources."/animals".resources."/{id}".methods.get]
/// responses = { "200" = "Animal" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    /// Description for generated documentation.
    #[serde(default)]
    pub description: Option<String>,

    /// HTTP methods keyed by verb.
    #[serde(default)]
    pub methods: IndexMap<String, Method>,

    /// Nested resources keyed by relative URI.
    #[serde(default)]
    pub resources: IndexMap<String, Resource>,
}

/// A method on a resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Description for generated documentation.
    #[serde(default)]
    pub description: Option<String>,

    /// Request payload type expression.
    #[serde(default)]
    pub body: Option<String>,

    /// Response payload type expressions keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, String>,
}

impl Method {
    /// Request and response payload type expressions, request first.
    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.body
            .as_deref()
            .into_iter()
            .chain(self.responses.values().map(String::as_str))
    }
}

impl Resource {
    /// Visit this resource and all nested resources depth-first.
    pub fn walk<'a>(&'a self, uri: &str, visit: &mut impl FnMut(&str, &'a Resource)) {
        visit(uri, self);
        for (child_uri, child) in &self.resources {
            let full = format!("{}{}", uri, child_uri);
            child.walk(&full, visit);
        }
    }
}
