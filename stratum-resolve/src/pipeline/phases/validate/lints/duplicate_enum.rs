//! Lint for enum names generated by more than one declaration.

use stratum_core::BackendConfig;

use super::super::Lint;
use crate::{
    enums::{duplicate_enum_error, duplicate_enum_names},
    graph::TypeGraph,
    pipeline::Diagnostic,
};

/// Lint that errors when an enum alias type and a property enum (or two
/// property enums) would share one generated name.
pub struct DuplicateEnumLint;

impl Lint for DuplicateEnumLint {
    fn name(&self) -> &'static str {
        "duplicate-enum"
    }

    fn description(&self) -> &'static str {
        "Detect generated enum names that are not unique"
    }

    fn check(&self, graph: &TypeGraph, _config: &BackendConfig, diagnostics: &mut Vec<Diagnostic>) {
        for (name, sources) in duplicate_enum_names(graph) {
            let Some(last) = sources.last() else {
                continue;
            };
            let cause = duplicate_enum_error(&name, &sources);
            diagnostics.push(
                Diagnostic::error("validate", cause.to_string())
                    .at(last.location())
                    .caused_by(cause),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn check(content: &str) -> Vec<Diagnostic> {
        let schema = stratum_schema::parse_str(content).expect("Failed to parse schema");
        let graph = TypeGraph::from_schema(&schema).expect("Failed to build graph");
        let mut diagnostics = Vec::new();
        DuplicateEnumLint.check(&graph, &BackendConfig::java(), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_unique_names() {
        let diagnostics = check(
            r#"
            [types.Size]
            enum = ["small"]
            [types.Shirt.properties]
            fit = { type = "string", enum = ["slim"] }
            "#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_property_enum_shadows_enum_type() {
        let diagnostics = check(
            r#"
            [types.ShirtSize]
            enum = ["tiny"]
            [types.Shirt.properties]
            size = { type = "string", enum = ["small", "large"] }
            "#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(diagnostics[0].location.as_deref(), Some("types.ShirtSize"));
        assert!(matches!(
            &diagnostics[0].cause,
            Some(Error::Schema { type_name, .. }) if type_name == "ShirtSize"
        ));
    }

    #[test]
    fn test_message_names_every_source() {
        let diagnostics = check(
            r#"
            [types.Ab.properties]
            c = { type = "string", enum = ["x"] }
            [types.AbC]
            enum = ["y"]
            [types.A.properties]
            bC = { type = "string", enum = ["z"] }
            "#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "invalid declaration of 'AbC': enum name generated by property 'c' of 'Ab' and \
             type 'AbC'"
        );
    }
}
