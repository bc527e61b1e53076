//! Validation context and utilities for schema parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the schema, making it easier to pass validation context through
/// nested declarations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "api.toml");
/// ctx.push("types").validate_type_name("Cat", "type")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["types", "Cat"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "property in 'types.Cat'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a declared type name can be referenced from type expressions.
    pub fn validate_type_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_type_name(name) {
            return Err(self.source.invalid_type_name_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Fail on the first name that appears more than once.
    ///
    /// Repeated type names get a span on their second JSON key; repeated
    /// property names are reported without one.
    pub fn check_unique<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
        kind: &str,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                let span = if self.path.is_empty() {
                    find_repeated_key_span(self.source.src(), name)
                } else {
                    None
                };
                return Err(self
                    .source
                    .duplicate_name_error(name, self.context_for(kind), span));
            }
        }
        Ok(())
    }

    /// Validate a property key (an optional `?` marker is allowed).
    pub fn validate_property_name(&self, name: &str) -> Result<()> {
        if name.trim_end_matches('?').trim().is_empty() {
            return Err(self.source.validation_error(format!(
                "empty {}",
                self.context_for("property name")
            )));
        }
        Ok(())
    }
}

/// Characters that have a meaning inside type expressions.
const EXPRESSION_CHARS: &[char] = &['|', '[', ']', '{', '}', '(', ')', '?', ',', '.'];

/// Validate a declared type name.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_type_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }
    if name.chars().any(char::is_whitespace) {
        return Some("name cannot contain whitespace");
    }
    if name.contains(EXPRESSION_CHARS) {
        return Some("name cannot contain type expression syntax");
    }
    None
}

/// Find the span of a name in the TOML or JSON source
/// Searches for patterns like `.name]`, `.name.`, `"name"`
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    // Table header patterns with a leading dot, e.g. [types.Cat] or [types.Cat.properties]
    let header_patterns = [format!(".{}]", name), format!(".{}.", name)];

    for pattern in &header_patterns {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // Quoted keys, e.g. [types."Cat[]"] or { "Cat": ... }
    let quoted = format!("\"{}\"", name);
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos + 1, name.len())));
    }

    // No fallback - better to have no span than point to wrong location
    None
}

/// Span of the second occurrence of `"name"` used as a JSON object key.
pub(crate) fn find_repeated_key_span(src: &str, name: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", name);
    src.match_indices(&quoted)
        .filter(|(pos, _)| src[pos + quoted.len()..].trim_start().starts_with(':'))
        .nth(1)
        .map(|(pos, _)| SourceSpan::from((pos + 1, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_type_names() {
        assert!(validate_type_name("Cat").is_none());
        assert!(validate_type_name("cat_toy").is_none());
        assert!(validate_type_name("UUID").is_none());
        assert!(validate_type_name("date-only").is_none());
    }

    #[test]
    fn test_invalid_type_names() {
        assert!(validate_type_name("").is_some());
        assert!(validate_type_name("Cat[]").is_some());
        assert!(validate_type_name("Cat | Dog").is_some());
        assert!(validate_type_name("lib.Cat").is_some());
        assert!(validate_type_name("Cat?").is_some());
    }

    #[test]
    fn test_find_name_span_header() {
        let src = "[types.Cat]\ntype = \"Animal\"";
        let span = find_name_span(src, "Cat").unwrap();
        assert_eq!(span.offset(), 7);
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_find_name_span_quoted() {
        let src = "[types.\"Cat[]\"]";
        let span = find_name_span(src, "Cat[]").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_name_span_missing() {
        assert!(find_name_span("[types.Dog]", "Cat").is_none());
    }

    #[test]
    fn test_find_repeated_key_span() {
        let src = r#"{"A": {"type": "A"}, "A": {}}"#;
        let span = find_repeated_key_span(src, "A").unwrap();
        assert_eq!(span.offset(), 22);
        assert!(find_repeated_key_span(r#"{"A": 1}"#, "A").is_none());
    }

    #[test]
    fn test_check_unique() {
        let ctx = ParseContext::new("", "api.json");
        assert!(ctx.check_unique(["A", "B"], "type").is_ok());

        let err = ctx
            .push("types")
            .push("Cat")
            .check_unique(["x", "y", "x"], "property")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "'x' declared more than once as property in 'types.Cat'"
        );
    }

    #[test]
    fn test_parse_context_push() {
        let ctx = ParseContext::new("", "api.toml");
        let nested = ctx.push("types").push("Cat");
        assert_eq!(nested.path_string(), "types.Cat");
        assert_eq!(nested.context_for("property"), "property in 'types.Cat'");
        assert_eq!(ctx.context_for("type"), "type");
    }

    #[test]
    fn test_parse_context_validate_type_name() {
        let ctx = ParseContext::new("[types.\"A|B\"]", "api.toml");
        let err = ctx.validate_type_name("A|B", "type").unwrap_err();
        assert!(err.to_string().contains("invalid type name 'A|B'"));
    }
}
