//! Assembly of the resolved model.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use stratum_core::BackendConfig;
use stratum_ir::{ResolvedClass, ResolvedEnum, ResolvedField, ResolvedModel};
use tracing::{debug, warn};

use crate::{
    Result,
    enums::{check_enum_names, resolve_enum},
    graph::{TypeGraph, TypeKind, TypeNode},
    hierarchy::Hierarchy,
    mapper::{FieldError, FieldMapper},
    polymorphism::PolymorphismAnalysis,
};

/// A property left out of the model because it could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedField {
    pub type_name: String,
    pub property: String,
    pub error: FieldError,
}

impl DroppedField {
    /// Schema location of the property (e.g. `types.Cat.properties.toys`).
    pub fn location(&self) -> String {
        format!("types.{}.properties.{}", self.type_name, self.property)
    }
}

/// Output of a resolution run: the model and the fields it had to drop.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub model: ResolvedModel,
    pub dropped: Vec<DroppedField>,
}

/// Combines hierarchy, mapping and polymorphism results into resolved classes.
///
/// The resolver only borrows its inputs, so independent runs (one per
/// backend) can share a graph across threads.
#[derive(Debug)]
pub struct Resolver<'a> {
    graph: &'a TypeGraph,
    hierarchy: Hierarchy<'a>,
    analysis: &'a PolymorphismAnalysis,
    config: &'a BackendConfig,
}

impl<'a> Resolver<'a> {
    /// # Errors
    ///
    /// Returns [`crate::Error::Cycle`] if the graph has an inheritance cycle,
    /// [`crate::Error::Schema`] if two declarations generate the same enum name.
    pub fn new(
        graph: &'a TypeGraph,
        analysis: &'a PolymorphismAnalysis,
        config: &'a BackendConfig,
    ) -> Result<Self> {
        let hierarchy = Hierarchy::new(graph)?;
        check_enum_names(graph)?;
        Ok(Self {
            graph,
            hierarchy,
            analysis,
            config,
        })
    }

    pub fn hierarchy(&self) -> &Hierarchy<'a> {
        &self.hierarchy
    }

    /// Resolve every declared type except those the backend provides natively.
    pub fn resolve(&self) -> Resolution {
        let mut classes = IndexMap::with_capacity(self.graph.len());
        let mut enums: BTreeMap<String, ResolvedEnum> = BTreeMap::new();
        let mut dropped = Vec::new();

        for node in self.graph.nodes() {
            if self.config.is_native(&node.name) {
                debug!(type_name = %node.name, backend = %self.config.name, "skipping native type");
                continue;
            }

            let (class, class_enums, class_dropped) = self.resolve_class(node);
            // Inherited enum fields repeat the declaring type's enum
            for def in class_enums {
                enums.entry(def.name.clone()).or_insert(def);
            }
            dropped.extend(class_dropped);
            classes.insert(class.name.clone(), class);
        }

        Resolution {
            model: ResolvedModel {
                classes,
                enums: enums.into_values().collect(),
                deserializers: self.analysis.deserializers(),
            },
            dropped,
        }
    }

    /// Resolve one type.
    ///
    /// Returns the class, the enums its fields generate, and the fields that
    /// were dropped.
    pub fn resolve_class(
        &self,
        node: &TypeNode,
    ) -> (ResolvedClass, Vec<ResolvedEnum>, Vec<DroppedField>) {
        let mapper = FieldMapper::new(&self.hierarchy, self.config);
        let mut fields = IndexMap::new();
        let mut enums = Vec::new();
        let mut dropped = Vec::new();

        for (prop_name, flat) in self.hierarchy.flattened(&node.name) {
            let spec = flat.spec;
            let mapped = match mapper.map_property(flat.declared_in, spec) {
                Ok(mapped) => mapped,
                Err(error) => {
                    // Report each drop once, on the type that declares the property
                    if flat.declared_in == node.name {
                        warn!(type_name = %node.name, property = prop_name, %error, "dropping field");
                        dropped.push(DroppedField {
                            type_name: node.name.clone(),
                            property: prop_name.to_string(),
                            error,
                        });
                    }
                    continue;
                }
            };

            let is_member =
                flat.declared_in == node.name && self.hierarchy.is_member(&node.name, spec);
            let required_child_overrides = self.hierarchy.required_child_overrides(
                &mapped.target,
                spec,
                self.config.required_overrides,
            );

            enums.extend(mapped.enum_def);
            fields.insert(
                prop_name.to_string(),
                ResolvedField {
                    name: prop_name.to_string(),
                    target: mapped.target,
                    required: spec.required,
                    is_member,
                    declared_in: flat.declared_in.to_string(),
                    required_child_overrides,
                    union_members: mapped.union_members,
                    description: spec.description.clone(),
                },
            );
        }

        let enum_def = match &node.kind {
            TypeKind::Enum(values) => {
                let def = resolve_enum(node.name.as_str(), None, None, values);
                enums.push(def.clone());
                Some(def)
            }
            _ => None,
        };

        let children = self.graph.children_of(&node.name).to_vec();
        let class = ResolvedClass {
            name: node.name.clone(),
            description: node
                .description
                .as_deref()
                .map(|d| d.lines().map(String::from).collect())
                .unwrap_or_default(),
            parent_name: node.parent_name.clone(),
            fields,
            is_abstract: self.analysis.is_abstract(&node.name),
            has_children: !children.is_empty(),
            children,
            has_required_properties: node.properties.values().any(|p| p.required),
            deserializer_target: self.analysis.deserializer_target(self.graph, &node.name),
            enum_def,
        };

        debug!(
            type_name = %class.name,
            fields = class.fields.len(),
            members = class.members().count(),
            "resolved type"
        );
        (class, enums, dropped)
    }
}
