//! Enum naming and member identifier sanitization.

use std::{collections::BTreeMap, fmt};

use stratum_core::{capitalize, sanitize_identifier};
use stratum_ir::{EnumMember, ResolvedEnum};
use stratum_schema::EnumLiteral;

use crate::{
    Error, Result,
    graph::{TypeGraph, TypeKind},
};

/// Name of the enum generated for a property: `PascalCase(owner) + PascalCase(property)`.
pub fn enum_name(owner: &str, property: &str) -> String {
    format!("{}{}", capitalize(owner), capitalize(property))
}

/// Sanitized member identifier for a literal.
///
/// The literal is uppercased, characters outside `[A-Za-z0-9_]` become `_`
/// and a leading digit gets a `_` prefix. Numeric literals are prefixed with
/// `E` first, so `2` and `"2"` yield `E2` and `_2`.
pub fn member_ident(literal: &EnumLiteral) -> String {
    let raw = match literal {
        EnumLiteral::String(s) => s.to_uppercase(),
        numeric => format!("E{}", numeric).to_uppercase(),
    };
    if raw.is_empty() {
        return "_".to_string();
    }
    sanitize_identifier(&raw)
}

fn ir_literal(literal: &EnumLiteral) -> stratum_ir::EnumLiteral {
    match literal {
        EnumLiteral::String(s) => stratum_ir::EnumLiteral::String(s.clone()),
        numeric => stratum_ir::EnumLiteral::Number(numeric.to_string()),
    }
}

/// Build a standalone enum record.
pub fn resolve_enum(
    name: impl Into<String>,
    owner: Option<&str>,
    property: Option<&str>,
    values: &[EnumLiteral],
) -> ResolvedEnum {
    ResolvedEnum {
        name: name.into(),
        owner: owner.map(String::from),
        property: property.map(String::from),
        members: values
            .iter()
            .map(|literal| EnumMember {
                ident: member_ident(literal),
                literal: ir_literal(literal),
            })
            .collect(),
    }
}

/// Identifiers produced by more than one literal, with the colliding literals.
pub fn colliding_idents(values: &[EnumLiteral]) -> Vec<(String, Vec<String>)> {
    let mut by_ident: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for literal in values {
        by_ident
            .entry(member_ident(literal))
            .or_default()
            .push(literal.to_string());
    }
    by_ident
        .into_iter()
        .filter(|(_, literals)| literals.len() > 1)
        .collect()
}

/// A declaration that generates an enum: an enum alias type, or a property
/// with literals declared directly on `owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSource<'g> {
    pub owner: &'g str,
    pub property: Option<&'g str>,
}

impl EnumSource<'_> {
    /// Schema location of the declaration.
    pub fn location(&self) -> String {
        match self.property {
            Some(property) => format!("types.{}.properties.{}", self.owner, property),
            None => format!("types.{}", self.owner),
        }
    }
}

impl fmt::Display for EnumSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property {
            Some(property) => write!(f, "property '{}' of '{}'", property, self.owner),
            None => write!(f, "type '{}'", self.owner),
        }
    }
}

/// Every generated enum name with the declarations that produce it.
///
/// Inherited enum properties reuse the declaring type's enum, so only
/// properties declared directly on a type count.
pub fn enum_sources(graph: &TypeGraph) -> BTreeMap<String, Vec<EnumSource<'_>>> {
    let mut sources: BTreeMap<String, Vec<EnumSource<'_>>> = BTreeMap::new();
    for node in graph.nodes() {
        if matches!(node.kind, TypeKind::Enum(_)) {
            sources.entry(node.name.clone()).or_default().push(EnumSource {
                owner: &node.name,
                property: None,
            });
        }
        for spec in node.properties.values().filter(|spec| spec.is_enum()) {
            sources
                .entry(enum_name(&node.name, &spec.name))
                .or_default()
                .push(EnumSource {
                    owner: &node.name,
                    property: Some(spec.name.as_str()),
                });
        }
    }
    sources
}

/// Enum names generated by more than one declaration.
pub fn duplicate_enum_names(graph: &TypeGraph) -> Vec<(String, Vec<EnumSource<'_>>)> {
    enum_sources(graph)
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .collect()
}

/// Error for an enum name generated by several declarations.
pub fn duplicate_enum_error(name: &str, sources: &[EnumSource<'_>]) -> Error {
    let sources: Vec<String> = sources.iter().map(ToString::to_string).collect();
    Error::schema(
        name,
        format!("enum name generated by {}", sources.join(" and ")),
    )
}

/// Fails on the first enum name generated by more than one declaration.
pub fn check_enum_names(graph: &TypeGraph) -> Result<()> {
    match duplicate_enum_names(graph).first() {
        Some((name, sources)) => Err(duplicate_enum_error(name, sources)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_name() {
        assert_eq!(enum_name("shirt", "size"), "ShirtSize");
        assert_eq!(enum_name("Order", "deliveryMode"), "OrderDeliveryMode");
    }

    #[test]
    fn test_member_idents() {
        assert_eq!(member_ident(&"2-for-1".into()), "_2_FOR_1");
        assert_eq!(member_ident(&"small".into()), "SMALL");
        assert_eq!(member_ident(&"x large".into()), "X_LARGE");
        assert_eq!(member_ident(&"".into()), "_");
    }

    #[test]
    fn test_numeric_and_string_origin_differ() {
        assert_eq!(member_ident(&EnumLiteral::Integer(2)), "E2");
        assert_eq!(member_ident(&"2".into()), "_2");
        assert_eq!(member_ident(&EnumLiteral::Float(2.5)), "E2_5");
        assert_eq!(member_ident(&EnumLiteral::Integer(-1)), "E_1");
    }

    #[test]
    fn test_resolve_enum_literals() {
        let resolved = resolve_enum(
            "ShirtSize",
            Some("Shirt"),
            Some("size"),
            &["small".into(), EnumLiteral::Integer(2)],
        );
        assert_eq!(resolved.members[0].ident, "SMALL");
        assert_eq!(resolved.members[0].literal.to_code_string(), "\"small\"");
        assert_eq!(resolved.members[1].ident, "E2");
        assert_eq!(resolved.members[1].literal.to_code_string(), "2");
        assert_eq!(resolved.owner.as_deref(), Some("Shirt"));
    }

    #[test]
    fn test_colliding_idents() {
        let collisions = colliding_idents(&["a-b".into(), "a_b".into(), "c".into()]);
        assert_eq!(
            collisions,
            vec![("A_B".to_string(), vec!["a-b".to_string(), "a_b".to_string()])]
        );
        assert!(colliding_idents(&[EnumLiteral::Integer(2), "2".into()]).is_empty());
    }

    #[test]
    fn test_field_enum_clashing_with_enum_type() {
        let schema = stratum_schema::parse_str(
            r#"
            [types.ShirtSize]
            enum = ["tiny"]

            [types.Shirt.properties]
            size = { type = "string", enum = ["small", "large"] }
            "#,
        )
        .unwrap();
        let graph = TypeGraph::from_schema(&schema).unwrap();

        let duplicates = duplicate_enum_names(&graph);
        assert_eq!(duplicates.len(), 1);
        let (name, sources) = &duplicates[0];
        assert_eq!(name, "ShirtSize");
        let locations: Vec<_> = sources.iter().map(EnumSource::location).collect();
        assert_eq!(locations, vec!["types.Shirt.properties.size", "types.ShirtSize"]);

        assert_eq!(
            check_enum_names(&graph).unwrap_err().to_string(),
            "invalid declaration of 'ShirtSize': enum name generated by property 'size' of \
             'Shirt' and type 'ShirtSize'"
        );
    }

    #[test]
    fn test_inherited_enum_property_not_duplicated() {
        let schema = stratum_schema::parse_str(
            r#"
            [types.Shirt.properties]
            size = { type = "string", enum = ["small"] }
            [types.Polo]
            type = "Shirt"
            "#,
        )
        .unwrap();
        let graph = TypeGraph::from_schema(&schema).unwrap();

        assert!(duplicate_enum_names(&graph).is_empty());
        assert!(check_enum_names(&graph).is_ok());
    }
}
