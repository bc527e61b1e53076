//! Lint for inheritance cycles.

use std::collections::BTreeSet;

use stratum_core::BackendConfig;

use super::super::Lint;
use crate::{Error, graph::TypeGraph, hierarchy::ancestor_chain, pipeline::Diagnostic};

/// Lint that errors on self- or mutually-referential parent chains.
pub struct InheritanceCycleLint;

impl Lint for InheritanceCycleLint {
    fn name(&self) -> &'static str {
        "inheritance-cycle"
    }

    fn description(&self) -> &'static str {
        "Detect types whose parent chain loops"
    }

    fn check(&self, graph: &TypeGraph, _config: &BackendConfig, diagnostics: &mut Vec<Diagnostic>) {
        // Each loop is reported once, on its first member by name
        let mut reported: BTreeSet<Vec<String>> = BTreeSet::new();

        for node in graph.nodes() {
            let Err(cause) = ancestor_chain(graph, &node.name) else {
                continue;
            };
            let Error::Cycle { chain, .. } = &cause else {
                continue;
            };
            let Some(repeated) = chain.last() else {
                continue;
            };
            let start = chain.iter().position(|n| n == repeated).unwrap_or(0);
            let mut members = chain[start..chain.len() - 1].to_vec();
            members.sort();

            if reported.insert(members) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("inheritance cycle: {}", chain[start..].join(" -> ")),
                    )
                    .at(format!("types.{}", node.name))
                    .caused_by(cause.clone()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<Diagnostic> {
        let schema = stratum_schema::parse_str(content).expect("Failed to parse schema");
        let graph = TypeGraph::from_schema(&schema).expect("Failed to build graph");
        let mut diagnostics = Vec::new();
        InheritanceCycleLint.check(&graph, &BackendConfig::java(), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_no_cycles() {
        let diagnostics = check(
            r#"
            [types.Animal]
            [types.Cat]
            type = "Animal"
            "#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_self_reference() {
        let diagnostics = check(
            r#"
            [types.A]
            type = "A"
            "#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "inheritance cycle: A -> A");
        assert_eq!(diagnostics[0].location.as_deref(), Some("types.A"));
        assert!(matches!(diagnostics[0].cause, Some(Error::Cycle { .. })));
    }

    #[test]
    fn test_mutual_cycle_reported_once() {
        let diagnostics = check(
            r#"
            [types.A]
            type = "B"
            [types.B]
            type = "A"
            [types.C]
            type = "A"
            "#,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "inheritance cycle: A -> B -> A");
    }
}
