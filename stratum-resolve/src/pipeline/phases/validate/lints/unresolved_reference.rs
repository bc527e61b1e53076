//! Lint for references to undeclared types.

use stratum_core::{BackendConfig, PrimitiveTable};

use super::super::Lint;
use crate::{
    graph::{TypeExpr, TypeGraph},
    pipeline::Diagnostic,
};

/// Lint that notes property types which are neither primitives nor declared
/// types. Such references are kept as opaque object references.
pub struct UnresolvedReferenceLint;

impl Lint for UnresolvedReferenceLint {
    fn name(&self) -> &'static str {
        "unresolved-reference"
    }

    fn description(&self) -> &'static str {
        "Report references to types the schema does not declare"
    }

    fn check(&self, graph: &TypeGraph, config: &BackendConfig, diagnostics: &mut Vec<Diagnostic>) {
        for node in graph.nodes() {
            for prop in node.all_properties() {
                if prop.is_enum() {
                    continue;
                }
                for leaf in prop.declared.leaves() {
                    if is_unresolved(leaf, graph, config) {
                        diagnostics.push(
                            Diagnostic::info(
                                "validate",
                                format!(
                                    "'{}' in property '{}' of '{}' is not a declared type",
                                    leaf, prop.name, node.name
                                ),
                            )
                            .at(format!("types.{}.properties.{}", node.name, prop.name)),
                        );
                    }
                }
            }
        }
    }
}

fn is_unresolved(leaf: &TypeExpr, graph: &TypeGraph, config: &BackendConfig) -> bool {
    let Some(name) = leaf.bare_name() else {
        return false;
    };
    !name.is_empty()
        && config.primitives.lookup(&leaf.to_string()).is_none()
        && !graph.contains(name)
}
