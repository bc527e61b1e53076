//! Resolved model records.

use indexmap::IndexMap;
use serde::Serialize;

use crate::TargetType;

/// The fully resolved model of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedModel {
    /// Resolved classes, sorted by name.
    pub classes: IndexMap<String, ResolvedClass>,
    /// Standalone enumerations (field enums and enum alias types), sorted by name.
    pub enums: Vec<ResolvedEnum>,
    /// Discriminant-dispatch deserializers, sorted by name.
    pub deserializers: Vec<DeserializerSpec>,
}

impl ResolvedModel {
    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Option<&ResolvedClass> {
        self.classes.get(name)
    }

    /// Look up an enum by name.
    pub fn enumeration(&self, name: &str) -> Option<&ResolvedEnum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Look up a deserializer by name.
    pub fn deserializer(&self, name: &str) -> Option<&DeserializerSpec> {
        self.deserializers.iter().find(|d| d.name == name)
    }

    /// Walk `parent_name` links from a class up to its root.
    ///
    /// Returns the ancestors nearest first, excluding the class itself. The
    /// walk stops at a parent that has no class in the model (e.g. a
    /// backend-native type), or at the first repeated name.
    pub fn ancestors_of(&self, name: &str) -> Vec<&str> {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = self.classes.get(name);

        while let Some(class) = current {
            let Some(parent) = class.parent_name.as_deref() else {
                break;
            };
            if parent == name || chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.classes.get(parent);
        }
        chain
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the model has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A flattened, backend-agnostic description of one declared type.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedClass {
    /// Type name.
    pub name: String,
    /// Description lines.
    pub description: Vec<String>,
    /// Parent type, if the type inherits from a declared type.
    pub parent_name: Option<String>,
    /// Flattened fields, root ancestor's first.
    pub fields: IndexMap<String, ResolvedField>,
    /// Has children and is never used directly.
    pub is_abstract: bool,
    /// At least one declared type inherits from this one.
    pub has_children: bool,
    /// Direct children, sorted.
    pub children: Vec<String>,
    /// Some property declared directly on this type is required.
    pub has_required_properties: bool,
    /// Deserializer to use when reading this type.
    ///
    /// `<Name>Deserializer` for a dispatching base, the type's own name for a
    /// concrete child of such a base.
    pub deserializer_target: Option<String>,
    /// Set when the type itself is an enum alias.
    pub enum_def: Option<ResolvedEnum>,
}

impl ResolvedClass {
    /// Fields declared on this class (not suppressed as inherited).
    pub fn members(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.values().filter(|f| f.is_member)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.get(name)
    }

    /// Returns true if this class is an enum alias.
    pub fn is_enum(&self) -> bool {
        self.enum_def.is_some()
    }
}

/// A resolved property of a class.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedField {
    /// Property name (without any optional marker).
    pub name: String,
    /// Resolved type.
    pub target: TargetType,
    /// Whether the property is required.
    pub required: bool,
    /// Declared on this class, as opposed to inherited unchanged.
    pub is_member: bool,
    /// Type in the lineage whose declaration of this property won.
    pub declared_in: String,
    /// Property names that became required only at this use site.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_child_overrides: Vec<String>,
    /// Union member names as written in the schema.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub union_members: Vec<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A generated enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnum {
    /// Enum name.
    pub name: String,
    /// Owning type.
    pub owner: Option<String>,
    /// Owning property, for enums declared inline on a property.
    pub property: Option<String>,
    /// Members in declaration order.
    pub members: Vec<EnumMember>,
}

/// One member of a generated enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    /// Sanitized identifier.
    pub ident: String,
    /// Literal value.
    pub literal: EnumLiteral,
}

/// An enum literal, tagged with the kind of value it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EnumLiteral {
    String(String),
    Number(String),
}

impl EnumLiteral {
    /// Render the literal the way it appears in source code.
    pub fn to_code_string(&self) -> String {
        match self {
            EnumLiteral::String(s) => format!("\"{}\"", s),
            EnumLiteral::Number(n) => n.clone(),
        }
    }
}

/// A discriminant-dispatch deserializer for an abstract base type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeserializerSpec {
    /// Deserializer name (`<Base>Deserializer`).
    pub name: String,
    /// Abstract base type being dispatched.
    pub base: String,
    /// Field inspected to select the concrete type.
    pub discriminant: String,
    /// Concrete types, sorted.
    pub variants: Vec<String>,
}
