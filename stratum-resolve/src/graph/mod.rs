//! Normalized type graph.
//!
//! The graph is built once from a schema snapshot by [`TypeGraph::from_schema`]
//! and only read afterwards. Nodes are kept sorted by name so every pass over
//! the graph visits types in the same order.

mod builder;
mod expr;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use stratum_schema::EnumLiteral;

pub use expr::TypeExpr;

/// Scalar keywords recognized in base-type strings.
pub const SCALAR_KEYWORDS: &[&str] = &[
    "any",
    "boolean",
    "date-only",
    "datetime",
    "datetime-only",
    "file",
    "integer",
    "nil",
    "number",
    "string",
    "time-only",
];

/// Returns true if `name` is a scalar keyword.
pub fn is_scalar_keyword(name: &str) -> bool {
    SCALAR_KEYWORDS.contains(&name)
}

/// What a declared type is, after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Alias of a scalar keyword.
    Scalar(String),
    /// An object type, possibly inheriting from a declared parent.
    Object,
    /// Alias of an array type.
    Array(TypeExpr),
    /// Alias of a union type.
    Union(Vec<TypeExpr>),
    /// Enumeration of literals.
    Enum(Vec<EnumLiteral>),
    /// Reference to a type that is not declared in this schema.
    Reference(String),
}

impl TypeKind {
    /// Short label used in summaries and display.
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Scalar(_) => "scalar",
            TypeKind::Object => "object",
            TypeKind::Array(_) => "array",
            TypeKind::Union(_) => "union",
            TypeKind::Enum(_) => "enum",
            TypeKind::Reference(_) => "reference",
        }
    }
}

/// A normalized property declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    /// Property name, without the optional `?` marker.
    pub name: String,
    /// Parsed declared type.
    pub declared: TypeExpr,
    pub required: bool,
    /// Inline child properties, in declaration order.
    pub children: IndexMap<String, PropertySpec>,
    /// Enum literals (never empty when present).
    pub enum_values: Option<Vec<EnumLiteral>>,
    pub description: Option<String>,
}

impl PropertySpec {
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    /// This property and all nested inline properties, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a PropertySpec)) {
        visit(self);
        for child in self.children.values() {
            child.walk(visit);
        }
    }
}

/// One declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeKind,
    /// Parent type; always names a declared type when set.
    pub parent_name: Option<String>,
    /// Properties declared directly on this type, in declaration order.
    pub properties: IndexMap<String, PropertySpec>,
    pub description: Option<String>,
}

impl TypeNode {
    /// Every property of this type including nested inline properties.
    pub fn all_properties(&self) -> Vec<&PropertySpec> {
        let mut out = Vec::new();
        for prop in self.properties.values() {
            prop.walk(&mut |p| out.push(p));
        }
        out
    }
}

/// The set of declared types of one schema.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: IndexMap<String, TypeNode>,
    children: BTreeMap<String, Vec<String>>,
    payloads: Vec<TypeExpr>,
}

impl TypeGraph {
    /// Assemble a graph from already normalized nodes and payload references.
    pub fn new(nodes: impl IntoIterator<Item = TypeNode>, payloads: Vec<TypeExpr>) -> Self {
        let mut nodes: IndexMap<String, TypeNode> =
            nodes.into_iter().map(|n| (n.name.clone(), n)).collect();
        nodes.sort_keys();

        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for node in nodes.values() {
            if let Some(parent) = &node.parent_name {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(node.name.clone());
            }
        }
        // Nodes are sorted, so each child list already is.

        Self {
            nodes,
            children,
            payloads,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// All nodes, sorted by name.
    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of a declared type.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.nodes.get(name)?.parent_name.as_deref()
    }

    /// Direct children of a type, sorted by name.
    pub fn children_of(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_children(&self, name: &str) -> bool {
        !self.children_of(name).is_empty()
    }

    /// Request and response payload types of every resource method.
    pub fn payloads(&self) -> &[TypeExpr] {
        &self.payloads
    }

    /// A serializable overview of the graph.
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            types: self
                .nodes()
                .map(|node| NodeSummary {
                    name: node.name.clone(),
                    kind: node.kind.label(),
                    parent: node.parent_name.clone(),
                    properties: node
                        .properties
                        .values()
                        .map(|p| format!("{}: {}", p.name, p.declared))
                        .collect(),
                })
                .collect(),
            payloads: self.payloads.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Serializable overview of a [`TypeGraph`].
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub types: Vec<NodeSummary>,
    pub payloads: Vec<String>,
}

/// Serializable overview of a [`TypeNode`].
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub properties: Vec<String>,
}
