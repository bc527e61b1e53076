//! Ancestor chains, property flattening and member detection.

use std::collections::HashMap;

use indexmap::IndexMap;
use stratum_core::{RequiredOverrideMode, capitalize};
use stratum_ir::TargetType;

use crate::{
    Error, Result,
    graph::{PropertySpec, TypeGraph},
};

/// Walk `parent_name` links from `name` to the root.
///
/// Returns ancestors nearest first, excluding `name` itself. An undeclared
/// name has an empty chain.
///
/// # Errors
///
/// Returns [`Error::Cycle`] if the walk revisits a type.
pub fn ancestor_chain<'g>(graph: &'g TypeGraph, name: &str) -> Result<Vec<&'g str>> {
    let mut chain: Vec<&'g str> = Vec::new();
    let mut current = graph.parent_of(name);

    while let Some(parent) = current {
        if parent == name || chain.contains(&parent) {
            let mut cycle = vec![name.to_string()];
            cycle.extend(chain.iter().map(|n| n.to_string()));
            cycle.push(parent.to_string());
            return Err(Error::Cycle {
                type_name: name.to_string(),
                chain: cycle,
            });
        }
        chain.push(parent);
        current = graph.parent_of(parent);
    }
    Ok(chain)
}

/// A property as seen from a type after inheritance is applied.
#[derive(Debug, Clone, Copy)]
pub struct FlatProperty<'g> {
    /// The type in the lineage whose declaration won.
    pub declared_in: &'g str,
    pub spec: &'g PropertySpec,
}

/// Merge properties along a lineage (self first, root last).
///
/// Properties are applied root to self. A redeclared property replaces the
/// inherited one but keeps the position where the name was first seen.
pub fn flatten_properties<'g>(
    graph: &'g TypeGraph,
    lineage: &[&str],
) -> IndexMap<&'g str, FlatProperty<'g>> {
    let mut flat: IndexMap<&'g str, FlatProperty<'g>> = IndexMap::new();

    for name in lineage.iter().rev() {
        let Some(node) = graph.get(name) else {
            continue;
        };
        for (prop_name, spec) in &node.properties {
            flat.insert(
                prop_name.as_str(),
                FlatProperty {
                    declared_in: node.name.as_str(),
                    spec,
                },
            );
        }
    }
    flat
}

/// Inheritance view of a cycle-free graph.
///
/// Construction computes every ancestor chain once, so later queries cannot
/// fail.
#[derive(Debug, Clone)]
pub struct Hierarchy<'g> {
    graph: &'g TypeGraph,
    chains: HashMap<&'g str, Vec<&'g str>>,
}

impl<'g> Hierarchy<'g> {
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] for the first type (by name) whose chain loops.
    pub fn new(graph: &'g TypeGraph) -> Result<Self> {
        let mut chains = HashMap::with_capacity(graph.len());
        for node in graph.nodes() {
            chains.insert(node.name.as_str(), ancestor_chain(graph, &node.name)?);
        }
        Ok(Self { graph, chains })
    }

    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// Ancestors of a type, nearest first; empty for undeclared names.
    pub fn chain(&self, name: &str) -> &[&'g str] {
        self.chains.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The type followed by its ancestors; empty for undeclared names.
    pub fn lineage(&self, name: &str) -> Vec<&'g str> {
        let Some(node) = self.graph.get(name) else {
            return Vec::new();
        };
        std::iter::once(node.name.as_str())
            .chain(self.chain(name).iter().copied())
            .collect()
    }

    /// Effective properties of a type, inherited ones included.
    pub fn flattened(&self, name: &str) -> IndexMap<&'g str, FlatProperty<'g>> {
        flatten_properties(self.graph, &self.lineage(name))
    }

    /// Whether a property declared on `type_name` is emitted there.
    ///
    /// A property whose effective declaration on the parent has the identical
    /// type is emitted once, on the ancestor. Enum properties are always
    /// redeclared.
    pub fn is_member(&self, type_name: &str, spec: &PropertySpec) -> bool {
        if spec.is_enum() {
            return true;
        }
        let Some(parent) = self.graph.parent_of(type_name) else {
            return true;
        };
        match self.flattened(parent).get(spec.name.as_str()) {
            Some(inherited) => inherited.spec.is_enum() || inherited.spec.declared != spec.declared,
            None => true,
        }
    }

    /// Required names that a use-site override adds to the referenced type.
    ///
    /// Applies only when `target` references a declared type and the property
    /// carries inline child properties.
    pub fn required_child_overrides(
        &self,
        target: &TargetType,
        spec: &PropertySpec,
        mode: RequiredOverrideMode,
    ) -> Vec<String> {
        let TargetType::ObjectRef(referenced) = target else {
            return Vec::new();
        };
        let Some(node) = self.graph.get(referenced) else {
            return Vec::new();
        };
        if spec.children.is_empty() {
            return Vec::new();
        }

        let child = required_names(spec.children.values());
        let base = required_names(node.properties.values());

        match mode {
            RequiredOverrideMode::Legacy if child.len() > base.len() => {
                child[base.len()..].to_vec()
            }
            RequiredOverrideMode::Legacy => Vec::new(),
            RequiredOverrideMode::SetDifference => {
                child.into_iter().filter(|n| !base.contains(n)).collect()
            }
        }
    }
}

/// Capitalized names of the required properties, sorted.
fn required_names<'a>(props: impl Iterator<Item = &'a PropertySpec>) -> Vec<String> {
    let mut names: Vec<String> = props
        .filter(|p| p.required)
        .map(|p| capitalize(&p.name))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(content: &str) -> TypeGraph {
        let schema = stratum_schema::parse_str(content).expect("Failed to parse schema");
        TypeGraph::from_schema(&schema).expect("Failed to build graph")
    }

    const ZOO: &str = r#"
        [types.Animal.properties]
        name = "string"
        legs = "integer"

        [types.Feline]
        type = "Animal"
        [types.Feline.properties]
        legs = "integer"
        claws = "boolean"

        [types.Lion]
        type = "Feline"
        [types.Lion.properties]
        name = "datetime"
        mane = "boolean"
    "#;

    #[test]
    fn test_ancestor_chain_depth() {
        let graph = graph(ZOO);
        assert_eq!(ancestor_chain(&graph, "Lion").unwrap(), vec!["Feline", "Animal"]);
        assert_eq!(ancestor_chain(&graph, "Feline").unwrap(), vec!["Animal"]);
        assert!(ancestor_chain(&graph, "Animal").unwrap().is_empty());
        assert!(ancestor_chain(&graph, "Unknown").unwrap().is_empty());
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let graph = graph(
            r#"
            [types.A]
            type = "A"
            "#,
        );
        let err = ancestor_chain(&graph, "A").unwrap_err();
        assert_eq!(
            err,
            Error::Cycle {
                type_name: "A".into(),
                chain: vec!["A".into(), "A".into()],
            }
        );
        assert!(Hierarchy::new(&graph).is_err());
    }

    #[test]
    fn test_mutual_cycle() {
        let graph = graph(
            r#"
            [types.A]
            type = "B"
            [types.B]
            type = "A"
            [types.C]
            type = "A"
            "#,
        );
        let err = ancestor_chain(&graph, "C").unwrap_err();
        assert!(matches!(err, Error::Cycle { ref chain, .. } if chain == &["C", "A", "B", "A"]));
    }

    #[test]
    fn test_lineage() {
        let graph = graph(ZOO);
        let hierarchy = Hierarchy::new(&graph).unwrap();
        assert_eq!(hierarchy.lineage("Lion"), vec!["Lion", "Feline", "Animal"]);
        assert!(hierarchy.lineage("Unknown").is_empty());
    }

    #[test]
    fn test_flatten_keeps_first_position() {
        let graph = graph(ZOO);
        let hierarchy = Hierarchy::new(&graph).unwrap();
        let flat = hierarchy.flattened("Lion");

        let order: Vec<_> = flat.keys().copied().collect();
        assert_eq!(order, vec!["name", "legs", "claws", "mane"]);
        assert_eq!(flat["name"].declared_in, "Lion");
        assert_eq!(flat["legs"].declared_in, "Feline");
        assert_eq!(flat["claws"].declared_in, "Feline");
    }

    #[test]
    fn test_is_member() {
        let graph = graph(ZOO);
        let hierarchy = Hierarchy::new(&graph).unwrap();
        let feline = graph.get("Feline").unwrap();
        let lion = graph.get("Lion").unwrap();

        // Identical to the parent's declaration
        assert!(!hierarchy.is_member("Feline", &feline.properties["legs"]));
        assert!(hierarchy.is_member("Feline", &feline.properties["claws"]));
        // Different type than the inherited declaration
        assert!(hierarchy.is_member("Lion", &lion.properties["name"]));
        // Root types own every property
        let animal = graph.get("Animal").unwrap();
        assert!(hierarchy.is_member("Animal", &animal.properties["legs"]));
    }

    #[test]
    fn test_enum_always_member() {
        let graph = graph(
            r#"
            [types.Shirt.properties]
            size = { type = "string", enum = ["s", "m"] }

            [types.Polo]
            type = "Shirt"
            [types.Polo.properties]
            size = { type = "string", enum = ["s", "m"] }
            "#,
        );
        let hierarchy = Hierarchy::new(&graph).unwrap();
        let polo = graph.get("Polo").unwrap();
        assert!(hierarchy.is_member("Polo", &polo.properties["size"]));
    }

    fn override_graph() -> TypeGraph {
        graph(
            r#"
            [types.Person.properties]
            name = "string"
            zip = "string"
            "email?" = "string"

            [types.Order.properties.buyer]
            type = "Person"
            [types.Order.properties.buyer.properties]
            name = "string"
            zip = "string"
            email = "string"
            "#,
        )
    }

    #[test]
    fn test_required_child_overrides_legacy() {
        let graph = override_graph();
        let hierarchy = Hierarchy::new(&graph).unwrap();
        let buyer = &graph.get("Order").unwrap().properties["buyer"];
        let target = TargetType::ObjectRef("Person".into());

        // child = [Email, Name, Zip], base = [Name, Zip] -> positional suffix [Zip]
        assert_eq!(
            hierarchy.required_child_overrides(&target, buyer, RequiredOverrideMode::Legacy),
            vec!["Zip"]
        );
    }

    #[test]
    fn test_required_child_overrides_set_difference() {
        let graph = override_graph();
        let hierarchy = Hierarchy::new(&graph).unwrap();
        let buyer = &graph.get("Order").unwrap().properties["buyer"];
        let target = TargetType::ObjectRef("Person".into());

        assert_eq!(
            hierarchy.required_child_overrides(&target, buyer, RequiredOverrideMode::SetDifference),
            vec!["Email"]
        );
    }

    #[test]
    fn test_required_child_overrides_not_applicable() {
        let graph = override_graph();
        let hierarchy = Hierarchy::new(&graph).unwrap();
        let buyer = &graph.get("Order").unwrap().properties["buyer"];

        let opaque = TargetType::ObjectRef("Stranger".into());
        assert!(
            hierarchy
                .required_child_overrides(&opaque, buyer, RequiredOverrideMode::Legacy)
                .is_empty()
        );

        let name = &graph.get("Person").unwrap().properties["name"];
        let person = TargetType::ObjectRef("Person".into());
        assert!(
            hierarchy
                .required_child_overrides(&person, name, RequiredOverrideMode::Legacy)
                .is_empty()
        );
    }
}
