//! Abstract-type and discriminant-dispatch analysis.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use stratum_core::BackendConfig;
use stratum_ir::DeserializerSpec;
use tracing::debug;

use crate::graph::TypeGraph;

/// Which types are abstract and which need a discriminant-based deserializer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolymorphismAnalysis {
    /// Types referenced by some property or resource payload.
    used: BTreeSet<String>,
    /// Member sets of every union property.
    union_sets: Vec<BTreeSet<String>>,
    /// Types with children that are never used and have no parent.
    abstract_types: BTreeSet<String>,
    /// Deserializers keyed by base type.
    deserializers: BTreeMap<String, DeserializerSpec>,
}

impl PolymorphismAnalysis {
    /// Analyze a graph for one backend configuration.
    pub fn analyze(graph: &TypeGraph, config: &BackendConfig) -> Self {
        let mut used = BTreeSet::new();
        let mut union_sets = Vec::new();

        for node in graph.nodes() {
            for prop in node.all_properties() {
                used.extend(prop.declared.referenced_names().into_iter().map(String::from));
                if let Some(members) = prop.declared.union_members() {
                    union_sets.push(members.into_iter().map(String::from).collect());
                }
            }
        }
        for payload in graph.payloads() {
            used.extend(payload.referenced_names().into_iter().map(String::from));
        }

        let abstract_types: BTreeSet<String> = graph
            .nodes()
            .filter(|node| {
                node.parent_name.is_none()
                    && graph.has_children(&node.name)
                    && !used.contains(&node.name)
            })
            .map(|node| node.name.clone())
            .collect();

        let mut deserializers = BTreeMap::new();
        if config.has_annotations() {
            for base in &abstract_types {
                let children = graph.children_of(base);
                let covered = union_sets
                    .iter()
                    .any(|set: &BTreeSet<String>| children.iter().all(|c| set.contains(c)));
                if covered {
                    deserializers.insert(
                        base.clone(),
                        DeserializerSpec {
                            name: deserializer_name(base),
                            base: base.clone(),
                            discriminant: config.discriminant.clone(),
                            variants: children.to_vec(),
                        },
                    );
                }
            }
        }

        debug!(
            abstract_types = abstract_types.len(),
            deserializers = deserializers.len(),
            "analyzed polymorphism"
        );

        Self {
            used,
            union_sets,
            abstract_types,
            deserializers,
        }
    }

    /// A type is abstract when it has children, is never used directly and
    /// has no parent.
    pub fn is_abstract(&self, name: &str) -> bool {
        self.abstract_types.contains(name)
    }

    /// An abstract type needs a custom deserializer when an annotation style
    /// is configured and some union covers all of its direct children.
    pub fn needs_custom_deserializer(&self, name: &str) -> bool {
        self.deserializers.contains_key(name)
    }

    /// Deserializer target of a type.
    ///
    /// `<Name>Deserializer` for a type that needs a custom deserializer, the
    /// type's own name for a child of such a type, `None` otherwise.
    pub fn deserializer_target(&self, graph: &TypeGraph, name: &str) -> Option<String> {
        if let Some(spec) = self.deserializers.get(name) {
            return Some(spec.name.clone());
        }
        graph
            .parent_of(name)
            .filter(|parent| self.needs_custom_deserializer(parent))
            .map(|_| name.to_string())
    }

    /// All deserializers, sorted by name.
    pub fn deserializers(&self) -> Vec<DeserializerSpec> {
        let mut specs: Vec<DeserializerSpec> = self.deserializers.values().cloned().collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }
}

fn deserializer_name(base: &str) -> String {
    format!("{}Deserializer", base)
}
