//! Schema parsing from files and strings.

use std::{path::Path, str::FromStr};

use serde::{Deserialize, de::IgnoredAny};

use super::{Schema, validate::ParseContext};
use crate::{Error, Result, error::SourceContext, serde_helpers::entries_in_order};

/// Document format of a schema source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Toml,
    Json,
}

impl SchemaFormat {
    /// Pick a format from a file extension (defaults to TOML).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SchemaFormat::Json,
            _ => SchemaFormat::Toml,
        }
    }
}

impl FromStr for Schema {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_schema(s, "api.toml", SchemaFormat::Toml)
    }
}

impl Schema {
    /// Parse a schema file, choosing the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_schema(
            &content,
            &path.display().to_string(),
            SchemaFormat::from_path(path),
        )
    }

    /// Parse a TOML schema with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_schema(content, filename, SchemaFormat::Toml)
    }

    /// Parse a JSON schema.
    pub fn from_json_str(content: &str) -> Result<Self> {
        parse_schema(content, "api.json", SchemaFormat::Json)
    }
}

/// Parse a schema from content with the given filename for error reporting.
pub fn parse_schema(content: &str, filename: &str, format: SchemaFormat) -> Result<Schema> {
    let source_ctx = SourceContext::new(content, filename);
    let schema: Schema = match format {
        SchemaFormat::Toml => toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?,
        SchemaFormat::Json => {
            let schema = serde_json::from_str(content).map_err(|e| source_ctx.json_error(e))?;
            let outline: JsonOutline =
                serde_json::from_str(content).map_err(|e| source_ctx.json_error(e))?;
            check_json_keys(&outline, content, filename)?;
            schema
        }
    };
    validate_schema(&schema, content, filename)?;
    Ok(schema)
}

/// Key layout of a JSON schema with repeated keys kept.
///
/// serde_json keeps only the last value of a repeated object key, so
/// duplicates have to be found before the maps are built.
#[derive(Deserialize)]
struct JsonOutline {
    #[serde(default, deserialize_with = "entries_in_order")]
    types: Vec<(String, JsonTypeOutline)>,
}

#[derive(Deserialize)]
struct JsonTypeOutline {
    #[serde(default, deserialize_with = "entries_in_order")]
    properties: Vec<(String, IgnoredAny)>,
}

fn check_json_keys(outline: &JsonOutline, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);
    ctx.check_unique(outline.types.iter().map(|(name, _)| name.as_str()), "type")?;

    let types_ctx = ctx.push("types");
    for (name, decl) in &outline.types {
        types_ctx.push(name).check_unique(
            decl.properties.iter().map(|(prop, _)| prop.as_str()),
            "property",
        )?;
    }
    Ok(())
}

/// Validate the schema after parsing.
fn validate_schema(schema: &Schema, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);
    let types_ctx = ctx.push("types");

    for (name, decl) in &schema.types {
        ctx.validate_type_name(name, "type")?;

        let type_ctx = types_ctx.push(name);
        for prop_name in decl.properties.keys() {
            type_ctx.validate_property_name(prop_name)?;
        }
    }
    Ok(())
}
