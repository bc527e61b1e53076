//! Lint for enum literals that sanitize to the same identifier.

use stratum_core::BackendConfig;
use stratum_schema::EnumLiteral;

use super::super::Lint;
use crate::{
    enums::colliding_idents,
    graph::{TypeGraph, TypeKind},
    pipeline::Diagnostic,
};

/// Lint that warns when two literals of one enum map to the same member
/// identifier.
pub struct EnumCollisionLint;

impl Lint for EnumCollisionLint {
    fn name(&self) -> &'static str {
        "enum-collision"
    }

    fn description(&self) -> &'static str {
        "Detect enum literals with identical sanitized identifiers"
    }

    fn check(&self, graph: &TypeGraph, _config: &BackendConfig, diagnostics: &mut Vec<Diagnostic>) {
        for node in graph.nodes() {
            if let TypeKind::Enum(values) = &node.kind {
                report(values, &format!("types.{}", node.name), diagnostics);
            }
            for prop in node.all_properties() {
                if let Some(values) = &prop.enum_values {
                    let location = format!("types.{}.properties.{}", node.name, prop.name);
                    report(values, &location, diagnostics);
                }
            }
        }
    }
}

fn report(values: &[EnumLiteral], location: &str, diagnostics: &mut Vec<Diagnostic>) {
    for (ident, literals) in colliding_idents(values) {
        diagnostics.push(
            Diagnostic::warning(
                "validate",
                format!(
                    "enum literals {} all map to identifier '{}'",
                    literals.join(", "),
                    ident
                ),
            )
            .at(location),
        );
    }
}
