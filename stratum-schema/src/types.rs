//! Raw type and property declarations, exactly as written in the schema.

use indexmap::IndexMap;
use serde::Deserialize;

/// A declared type.
///
/// ```toml
/// [types.Cat]
/// type = "Animal"
/// description = "A cat"
///
/// [types.Cat.properties]
/// lives = "integer"
/// "nickname?" = "string"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Base type expression: a parent type name, a scalar keyword, `object`,
    /// an array or a union expression.
    #[serde(rename = "type", default)]
    pub base: Option<String>,

    /// Description for generated documentation.
    #[serde(default)]
    pub description: Option<String>,

    /// Properties in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDecl>,

    /// Enum literals (makes the type an enum alias).
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<EnumLiteral>>,
}

impl TypeDecl {
    /// Returns true if this type is an enum alias.
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }
}

/// A property declaration.
///
/// Supports both formats:
/// - Shorthand: `name = "string"`
/// - Table: `name = { type = "string", required = false, enum = ["a", "b"] }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "PropertyFormat")]
pub struct PropertyDecl {
    /// Declared type expression.
    pub type_name: Option<String>,
    /// Explicit required flag.
    pub required: Option<bool>,
    /// Description for generated documentation.
    pub description: Option<String>,
    /// Inline child properties (for inline objects and use-site overrides).
    pub properties: IndexMap<String, PropertyDecl>,
    /// Enum literals.
    pub enum_values: Option<Vec<EnumLiteral>>,
}

impl PropertyDecl {
    /// Shorthand property with just a type expression.
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    /// Returns true if the property declares enum literals.
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PropertyFormat {
    Short(String),
    Full(PropertyTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyTable {
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    properties: IndexMap<String, PropertyDecl>,
    #[serde(rename = "enum", default)]
    enum_values: Option<Vec<EnumLiteral>>,
}

impl From<PropertyFormat> for PropertyDecl {
    fn from(format: PropertyFormat) -> Self {
        match format {
            PropertyFormat::Short(type_name) => PropertyDecl::of_type(type_name),
            PropertyFormat::Full(table) => PropertyDecl {
                type_name: table.type_name,
                required: table.required,
                description: table.description,
                properties: table.properties,
                enum_values: table.enum_values,
            },
        }
    }
}

/// A raw enum literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    String(String),
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumLiteral::String(s) => write!(f, "{}", s),
            EnumLiteral::Integer(i) => write!(f, "{}", i),
            EnumLiteral::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for EnumLiteral {
    fn from(s: &str) -> Self {
        EnumLiteral::String(s.to_string())
    }
}

impl From<i64> for EnumLiteral {
    fn from(i: i64) -> Self {
        EnumLiteral::Integer(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        properties: IndexMap<String, PropertyDecl>,
    }

    fn parse(content: &str) -> IndexMap<String, PropertyDecl> {
        toml::from_str::<Wrapper>(content)
            .expect("Failed to parse TOML")
            .properties
    }

    #[test]
    fn test_shorthand_property() {
        let props = parse(
            r#"
            [properties]
            name = "string"
            "#,
        );
        assert_eq!(props["name"], PropertyDecl::of_type("string"));
    }

    #[test]
    fn test_table_property() {
        let props = parse(
            r#"
            [properties.owner]
            type = "Person"
            required = false
            description = "Who owns it"

            [properties.owner.properties]
            email = { type = "string", required = true }
            "#,
        );

        let owner = &props["owner"];
        assert_eq!(owner.type_name.as_deref(), Some("Person"));
        assert_eq!(owner.required, Some(false));
        assert_eq!(owner.properties["email"].required, Some(true));
    }

    #[test]
    fn test_mixed_enum_literals() {
        let props = parse(
            r#"
            [properties]
            size = { type = "string", enum = ["small", 2, 2.5] }
            "#,
        );

        let values = props["size"].enum_values.as_ref().unwrap();
        assert_eq!(
            values,
            &vec![
                EnumLiteral::String("small".into()),
                EnumLiteral::Integer(2),
                EnumLiteral::Float(2.5),
            ]
        );
    }

    #[test]
    fn test_property_order_preserved() {
        let props = parse(
            r#"
            [properties]
            zeta = "string"
            alpha = "string"
            mid = "string"
            "#,
        );
        let names: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unknown_property_key_rejected() {
        let result = toml::from_str::<Wrapper>(
            r#"
            [properties]
            name = { kind = "string" }
            "#,
        );
        assert!(result.is_err());
    }
}
