//! Backend configuration injected into a resolution run.

use std::{collections::BTreeSet, path::Path, str::FromStr};

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::PrimitiveMap;

/// How required-property overrides on a referencing property are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredOverrideMode {
    /// Positional suffix of the two independently sorted name lists.
    ///
    /// Matches the output of earlier generator releases, including its
    /// miscomputation when a newly required name sorts before an inherited one.
    #[default]
    Legacy,
    /// Names required on the referencing property but not on the referenced type.
    SetDifference,
}

/// Configuration of one output ecosystem.
///
/// ```toml
/// name = "java"
/// annotations = "jackson"
/// native_types = ["UUID"]
///
/// [primitives]
/// string = "String"
/// integer = "Integer"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Backend name, used in diagnostics.
    pub name: String,

    /// Annotation/serialization style (e.g. "jackson", "gson").
    /// Discriminant-based deserializers are only produced when set.
    #[serde(default)]
    pub annotations: Option<String>,

    /// Field inspected by generated deserializers to select a subtype.
    #[serde(default = "default_discriminant")]
    pub discriminant: String,

    /// Type used when union members share no declared ancestor.
    #[serde(default = "default_universal_base")]
    pub universal_base: String,

    /// Required-override computation mode.
    #[serde(default)]
    pub required_overrides: RequiredOverrideMode,

    /// Declared types the backend provides natively; no class is assembled for them.
    #[serde(default)]
    pub native_types: BTreeSet<String>,

    /// Schema keyword → backend primitive.
    #[serde(default)]
    pub primitives: PrimitiveMap,
}

fn default_discriminant() -> String {
    "name".to_string()
}

fn default_universal_base() -> String {
    "Object".to_string()
}

impl BackendConfig {
    /// Create a configuration with defaults and an empty primitive table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: None,
            discriminant: default_discriminant(),
            universal_base: default_universal_base(),
            required_overrides: RequiredOverrideMode::default(),
            native_types: BTreeSet::new(),
            primitives: PrimitiveMap::new(),
        }
    }

    /// Java backend preset (no annotation style).
    pub fn java() -> Self {
        Self::new("java")
            .with_primitives(PrimitiveMap::java())
            .with_native_type("UUID")
    }

    /// Python backend preset.
    pub fn python() -> Self {
        Self::new("python")
            .with_primitives(PrimitiveMap::python())
            .with_universal_base("object")
    }

    /// Set the annotation style.
    pub fn with_annotations(mut self, style: impl Into<String>) -> Self {
        self.annotations = Some(style.into());
        self
    }

    /// Replace the primitive table.
    pub fn with_primitives(mut self, primitives: PrimitiveMap) -> Self {
        self.primitives = primitives;
        self
    }

    /// Set the universal base type.
    pub fn with_universal_base(mut self, base: impl Into<String>) -> Self {
        self.universal_base = base.into();
        self
    }

    /// Set the discriminant field name.
    pub fn with_discriminant(mut self, field: impl Into<String>) -> Self {
        self.discriminant = field.into();
        self
    }

    /// Set the required-override mode.
    pub fn with_required_overrides(mut self, mode: RequiredOverrideMode) -> Self {
        self.required_overrides = mode;
        self
    }

    /// Mark a declared type as natively provided by the backend.
    pub fn with_native_type(mut self, name: impl Into<String>) -> Self {
        self.native_types.insert(name.into());
        self
    }

    /// Returns true if an annotation style is configured.
    pub fn has_annotations(&self) -> bool {
        self.annotations.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns true if the backend provides `name` natively.
    pub fn is_native(&self, name: &str) -> bool {
        self.native_types.contains(name)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        content
            .parse()
            .wrap_err_with(|| format!("invalid backend configuration in '{}'", path.display()))
    }
}

impl FromStr for BackendConfig {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
