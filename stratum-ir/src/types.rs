//! Resolved field types.

use std::fmt;

use serde::Serialize;

/// Backend-agnostic description of a field's type after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TargetType {
    /// A backend primitive, named by the backend's primitive table.
    Primitive(String),
    /// A homogeneous list.
    List(Box<TargetType>),
    /// A generated enumeration.
    EnumRef(String),
    /// A reference to a declared (or opaque) object type.
    ObjectRef(String),
    /// A union, collapsed to the nearest shared ancestor of its members.
    UnionRef {
        common_ancestor: String,
        members: Vec<TargetType>,
    },
}

impl TargetType {
    /// Wrap a type in a list.
    pub fn list(elem: TargetType) -> Self {
        TargetType::List(Box::new(elem))
    }

    /// The type name an emitter declares a field with.
    ///
    /// Lists are unwrapped and unions collapse to their common ancestor.
    pub fn declared_name(&self) -> &str {
        match self {
            TargetType::Primitive(name)
            | TargetType::EnumRef(name)
            | TargetType::ObjectRef(name) => name,
            TargetType::List(elem) => elem.declared_name(),
            TargetType::UnionRef {
                common_ancestor, ..
            } => common_ancestor,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Primitive(name) => write!(f, "{}", name),
            TargetType::List(elem) => write!(f, "List<{}>", elem),
            TargetType::EnumRef(name) => write!(f, "enum {}", name),
            TargetType::ObjectRef(name) => write!(f, "{}", name),
            TargetType::UnionRef {
                common_ancestor,
                members,
            } => {
                let members: Vec<String> = members.iter().map(ToString::to_string).collect();
                write!(f, "{} (one of {})", common_ancestor, members.join(" | "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn union() -> TargetType {
        TargetType::UnionRef {
            common_ancestor: "Animal".into(),
            members: vec![
                TargetType::ObjectRef("Cat".into()),
                TargetType::ObjectRef("Dog".into()),
            ],
        }
    }

    #[test]
    fn test_declared_name() {
        assert_eq!(TargetType::Primitive("String".into()).declared_name(), "String");
        assert_eq!(
            TargetType::list(TargetType::ObjectRef("Cat".into())).declared_name(),
            "Cat"
        );
        assert_eq!(union().declared_name(), "Animal");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TargetType::list(TargetType::Primitive("Integer".into())).to_string(),
            "List<Integer>"
        );
        assert_eq!(
            TargetType::EnumRef("CityPark".into()).to_string(),
            "enum CityPark"
        );
        assert_eq!(union().to_string(), "Animal (one of Cat | Dog)");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(TargetType::list(TargetType::Primitive("int".into())))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "list",
                "value": { "kind": "primitive", "value": "int" }
            })
        );
    }
}
