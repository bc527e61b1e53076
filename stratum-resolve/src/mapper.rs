//! Mapping of declared property types to [`TargetType`]s.

use stratum_core::{BackendConfig, PrimitiveTable};
use stratum_ir::{ResolvedEnum, TargetType};
use thiserror::Error;

use crate::{
    enums::{enum_name, resolve_enum},
    graph::{PropertySpec, TypeExpr},
    hierarchy::Hierarchy,
};

/// Why a single property could not be mapped. The field is dropped and the
/// rest of the type is still resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unsupported {construct} type '{expr}'")]
    Unsupported {
        construct: &'static str,
        expr: String,
    },

    #[error("cannot map type '{expr}': empty type name")]
    EmptyName { expr: String },
}

/// A successfully mapped property.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedField {
    pub target: TargetType,
    /// Member type names when the declared type is a union.
    pub union_members: Vec<String>,
    /// Enum generated for the property, if it declares literals.
    pub enum_def: Option<ResolvedEnum>,
}

/// Maps declared types using a backend's primitive table.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper<'a> {
    hierarchy: &'a Hierarchy<'a>,
    config: &'a BackendConfig,
}

impl<'a> FieldMapper<'a> {
    pub fn new(hierarchy: &'a Hierarchy<'a>, config: &'a BackendConfig) -> Self {
        Self { hierarchy, config }
    }

    /// Map a property declared on `owner`.
    pub fn map_property(&self, owner: &str, spec: &PropertySpec) -> Result<MappedField, FieldError> {
        if let Some(values) = &spec.enum_values {
            let name = enum_name(owner, &spec.name);
            return Ok(MappedField {
                target: TargetType::EnumRef(name.clone()),
                union_members: Vec::new(),
                enum_def: Some(resolve_enum(name, Some(owner), Some(&spec.name), values)),
            });
        }

        let target = self.map_expr(&spec.declared)?;
        let union_members = spec
            .declared
            .union_variants()
            .map(|variants| variants.iter().map(ToString::to_string).collect())
            .unwrap_or_default();

        Ok(MappedField {
            target,
            union_members,
            enum_def: None,
        })
    }

    /// Map a declared type expression.
    ///
    /// Precedence: exact primitive match on the canonical text, array of
    /// array (unsupported), array, map (unsupported), union, dotted
    /// reference, bare reference.
    pub fn map_expr(&self, expr: &TypeExpr) -> Result<TargetType, FieldError> {
        if expr.has_empty_name() {
            return Err(FieldError::EmptyName {
                expr: expr.to_string(),
            });
        }
        self.map_checked(expr)
    }

    fn map_checked(&self, expr: &TypeExpr) -> Result<TargetType, FieldError> {
        if let Some(primitive) = self.config.primitives.lookup(&expr.to_string()) {
            return Ok(TargetType::Primitive(primitive.to_string()));
        }

        match expr {
            TypeExpr::Array(inner) if matches!(**inner, TypeExpr::Array(_)) => {
                Err(FieldError::Unsupported {
                    construct: "bidimensional array",
                    expr: expr.to_string(),
                })
            }
            TypeExpr::Array(inner) => Ok(TargetType::list(self.map_checked(inner)?)),
            TypeExpr::Map(_) => Err(FieldError::Unsupported {
                construct: "map",
                expr: expr.to_string(),
            }),
            TypeExpr::Union(_) => {
                let variants = expr.union_variants().unwrap_or_default();
                let mapped = variants
                    .iter()
                    .map(|m| self.map_checked(m))
                    .collect::<Result<Vec<_>, _>>()?;
                let texts: Vec<String> = variants.iter().copied().map(member_name).collect();
                let names: Vec<&str> = texts.iter().map(String::as_str).collect();
                Ok(TargetType::UnionRef {
                    common_ancestor: self
                        .hierarchy
                        .common_ancestor(&names, &self.config.universal_base),
                    members: mapped,
                })
            }
            TypeExpr::Qualified { name, .. } | TypeExpr::Named(name) => {
                Ok(TargetType::ObjectRef(name.clone()))
            }
        }
    }
}

/// Name a union member is known by when looking for its ancestors.
fn member_name(member: &TypeExpr) -> String {
    member
        .bare_name()
        .map_or_else(|| member.to_string(), String::from)
}
