//! Diagnostics collected while a schema is resolved.

use serde::Serialize;

use crate::{Error, assembler::DroppedField};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A fatal error that prevents further processing.
    Error,
    /// A problem that leaves the model valid but incomplete.
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
    /// Location in the schema (e.g., "types.Cat.properties.toys").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Typed error behind an error diagnostic, returned when validation aborts.
    #[serde(skip)]
    pub cause: Option<Error>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
            cause: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach the typed error this diagnostic reports.
    pub fn caused_by(mut self, cause: Error) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Warning for a field left out of the model.
    pub fn dropped_field(phase: impl Into<String>, dropped: &DroppedField) -> Self {
        Self::warning(
            phase,
            format!(
                "field '{}' of '{}' dropped: {}",
                dropped.property, dropped.type_name, dropped.error
            ),
        )
        .at(dropped.location())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::FieldError;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("validate", "inheritance cycle");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "validate");
    }

    #[test]
    fn test_dropped_field_diagnostic() {
        let dropped = DroppedField {
            type_name: "Grid".into(),
            property: "cells".into(),
            error: FieldError::Unsupported {
                construct: "bidimensional array",
                expr: "integer[][]".into(),
            },
        };
        let diag = Diagnostic::dropped_field("assemble", &dropped);

        assert!(diag.severity.is_warning());
        assert_eq!(diag.location.as_deref(), Some("types.Grid.properties.cells"));
        assert_eq!(
            diag.to_string(),
            "warning: field 'cells' of 'Grid' dropped: unsupported bidimensional array type \
             'integer[][]' (at types.Grid.properties.cells)"
        );
    }

    #[test]
    fn test_cause_not_serialized() {
        let diag = Diagnostic::error("validate", "bad enum").caused_by(Error::schema("Size", "bad"));
        assert!(diag.cause.is_some());

        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "severity": "error", "phase": "validate", "message": "bad enum" })
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
