//! Normalization of raw schema declarations into a [`TypeGraph`].

use indexmap::IndexMap;
use stratum_schema::{PropertyDecl, Schema, TypeDecl};
use tracing::debug;

use super::{PropertySpec, TypeExpr, TypeGraph, TypeKind, TypeNode, is_scalar_keyword};
use crate::{Error, Result};

impl TypeGraph {
    /// Build the type graph of a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] for an empty type or property name, an empty
    /// declared type string, two property keys normalizing to the same name,
    /// or an empty enum literal list.
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let mut nodes = Vec::with_capacity(schema.types.len());
        for (name, decl) in &schema.types {
            nodes.push(build_node(schema, name, decl)?);
        }

        let payloads = schema
            .payload_types()
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .map(TypeExpr::parse)
            .collect();

        let graph = TypeGraph::new(nodes, payloads);
        debug!(types = graph.len(), "built type graph");
        Ok(graph)
    }
}

fn build_node(schema: &Schema, name: &str, decl: &TypeDecl) -> Result<TypeNode> {
    if name.trim().is_empty() {
        return Err(Error::schema(name, "type name cannot be empty"));
    }

    let base = decl.base.as_deref().map(str::trim);
    let (kind, parent_name) = match (&decl.enum_values, base) {
        (Some(values), _) if values.is_empty() => {
            return Err(Error::schema(name, "enum literal list cannot be empty"));
        }
        (Some(values), _) => (TypeKind::Enum(values.clone()), None),
        (None, Some(base)) if schema.has_type(base) => (TypeKind::Object, Some(base.to_string())),
        (None, base) => (infer_kind(name, base)?, None),
    };

    Ok(TypeNode {
        name: name.to_string(),
        kind,
        parent_name,
        properties: build_properties(name, &decl.properties)?,
        description: decl.description.clone(),
    })
}

/// Effective kind of a type whose base string names no declared type.
fn infer_kind(name: &str, base: Option<&str>) -> Result<TypeKind> {
    let Some(base) = base else {
        return Ok(TypeKind::Object);
    };
    if base.is_empty() {
        return Err(Error::schema(name, "base type cannot be empty"));
    }
    if base == "object" {
        return Ok(TypeKind::Object);
    }

    let kind = match TypeExpr::parse(base) {
        TypeExpr::Named(keyword) if is_scalar_keyword(&keyword) => TypeKind::Scalar(keyword),
        TypeExpr::Array(elem) => TypeKind::Array(*elem),
        TypeExpr::Union(members) => TypeKind::Union(members),
        other => TypeKind::Reference(other.to_string()),
    };
    Ok(kind)
}

fn build_properties(
    type_name: &str,
    decls: &IndexMap<String, PropertyDecl>,
) -> Result<IndexMap<String, PropertySpec>> {
    let mut properties: IndexMap<String, PropertySpec> = IndexMap::with_capacity(decls.len());

    for (key, decl) in decls {
        let spec = build_property(type_name, key, decl)?;
        if properties.contains_key(&spec.name) {
            return Err(Error::schema(
                type_name,
                format!("property '{}' is declared more than once", spec.name),
            ));
        }
        properties.insert(spec.name.clone(), spec);
    }
    Ok(properties)
}

fn build_property(type_name: &str, key: &str, decl: &PropertyDecl) -> Result<PropertySpec> {
    let (name, optional) = match key.trim().strip_suffix('?') {
        Some(name) => (name.trim(), true),
        None => (key.trim(), false),
    };
    if name.is_empty() {
        return Err(Error::schema(type_name, "property name cannot be empty"));
    }

    if decl.enum_values.as_ref().is_some_and(Vec::is_empty) {
        return Err(Error::schema(
            type_name,
            format!("enum literal list of property '{}' cannot be empty", name),
        ));
    }

    let declared = match decl.type_name.as_deref().map(str::trim) {
        Some("") => {
            return Err(Error::schema(
                type_name,
                format!("property '{}' has an empty type", name),
            ));
        }
        Some(text) => TypeExpr::parse(text),
        None if decl.properties.is_empty() => TypeExpr::named("string"),
        None => TypeExpr::named("object"),
    };

    Ok(PropertySpec {
        name: name.to_string(),
        declared,
        required: decl.required.unwrap_or(!optional),
        children: build_properties(type_name, &decl.properties)?,
        enum_values: decl.enum_values.clone(),
        description: decl.description.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(content: &str) -> TypeGraph {
        let schema = stratum_schema::parse_str(content).expect("Failed to parse schema");
        TypeGraph::from_schema(&schema).expect("Failed to build graph")
    }

    fn build_err(content: &str) -> Error {
        let schema = stratum_schema::parse_str(content).expect("Failed to parse schema");
        TypeGraph::from_schema(&schema).unwrap_err()
    }

    #[test]
    fn test_declared_parent() {
        let graph = graph(
            r#"
            [types.Animal]
            [types.Cat]
            type = "Animal"
            "#,
        );
        let cat = graph.get("Cat").unwrap();
        assert_eq!(cat.parent_name.as_deref(), Some("Animal"));
        assert_eq!(cat.kind, TypeKind::Object);
        assert_eq!(graph.get("Animal").unwrap().kind, TypeKind::Object);
    }

    #[test]
    fn test_inferred_kinds() {
        let graph = graph(
            r#"
            [types.Email]
            type = "string"

            [types.Tags]
            type = "string[]"

            [types.Pet]
            type = "Cat | Dog"

            [types.Thing]
            type = "object"

            [types.Remote]
            type = "lib.Remote"
            "#,
        );
        assert_eq!(graph.get("Email").unwrap().kind, TypeKind::Scalar("string".into()));
        assert_eq!(
            graph.get("Tags").unwrap().kind,
            TypeKind::Array(TypeExpr::named("string"))
        );
        assert!(matches!(graph.get("Pet").unwrap().kind, TypeKind::Union(ref m) if m.len() == 2));
        assert_eq!(graph.get("Thing").unwrap().kind, TypeKind::Object);
        assert_eq!(
            graph.get("Remote").unwrap().kind,
            TypeKind::Reference("lib.Remote".into())
        );
        assert!(graph.nodes().all(|n| n.parent_name.is_none()));
    }

    #[test]
    fn test_enum_kind_wins() {
        let graph = graph(
            r#"
            [types.Size]
            type = "string"
            enum = ["small", "large"]
            "#,
        );
        assert!(matches!(graph.get("Size").unwrap().kind, TypeKind::Enum(ref v) if v.len() == 2));
    }

    #[test]
    fn test_property_normalization() {
        let graph = graph(
            r#"
            [types.Cat.properties]
            name = "string"
            "nickname?" = "string"
            "owner?" = { type = "Person", required = true }
            untyped = {}

            [types.Cat.properties.toy.properties]
            color = "string"
            "#,
        );
        let props = &graph.get("Cat").unwrap().properties;
        let names: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "nickname", "owner", "untyped", "toy"]);

        assert!(props["name"].required);
        assert!(!props["nickname"].required);
        assert!(props["owner"].required);
        assert_eq!(props["untyped"].declared, TypeExpr::named("string"));
        assert_eq!(props["toy"].declared, TypeExpr::named("object"));
        assert!(props["toy"].children["color"].required);
    }

    #[test]
    fn test_payloads_collected() {
        let graph = graph(
            r#"
            [resources."/cats".methods.post]
            body = "NewCat"
            responses = { "201" = "Cat[]" }
            "#,
        );
        let payloads: Vec<_> = graph.payloads().iter().map(ToString::to_string).collect();
        assert_eq!(payloads, vec!["NewCat", "Cat[]"]);
    }

    #[test]
    fn test_duplicate_normalized_property() {
        let err = build_err(
            r#"
            [types.Cat.properties]
            name = "string"
            "name?" = "string"
            "#,
        );
        assert!(matches!(err, Error::Schema { ref type_name, .. } if type_name == "Cat"));
    }

    #[test]
    fn test_empty_type_string() {
        let err = build_err(
            r#"
            [types.Cat.properties]
            name = " "
            "#,
        );
        assert!(err.to_string().contains("empty type"));
    }

    #[test]
    fn test_empty_enum_list() {
        let err = build_err(
            r#"
            [types.Size]
            enum = []
            "#,
        );
        assert!(err.to_string().contains("enum literal list"));
    }
}
