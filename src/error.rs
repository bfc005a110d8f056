//! Structured error types for the Formpress engine.
//!
//! Edit operations on the form model fail with layout/reference errors,
//! rendering fails only on an unknown style name, and the JSON boundary
//! fails with a parse error carrying a hint. Visibility rules never error:
//! a malformed rule simply evaluates to `false`.

use thiserror::Error;

use crate::model::{FieldId, RowId};

/// The unified error type returned by all public Formpress API functions.
#[derive(Debug, Error)]
pub enum FormpressError {
    /// A row column count outside `1..=3`.
    #[error("Invalid layout: column count {column_count} is not 1, 2 or 3")]
    InvalidLayout { column_count: u8 },

    #[error("Unknown row: {0}")]
    UnknownRow(RowId),

    #[error("Unknown field: {0}")]
    UnknownField(FieldId),

    /// A condition rejected at authoring time (self-reference, no rules).
    #[error("Invalid condition on field {field}: {reason}")]
    InvalidCondition { field: FieldId, reason: String },

    /// A style identifier that is not `modern`, `classic` or `minimal`.
    #[error("Unknown style: {0:?} (expected modern, classic or minimal)")]
    UnknownStyle(String),

    /// JSON input failed to parse as a form definition or submission.
    #[error("Failed to parse input: {source}{}", format_hint(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// No template stored under the given id.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// PDF generation failed.
    #[error("Render error: {0}")]
    RenderError(String),
}

pub type Result<T> = std::result::Result<T, FormpressError>;

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FormpressError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the form schema. Check field types and names.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FormpressError::ParseError { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: FormpressError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse input"));
        assert!(msg.contains("trailing commas"));
    }

    #[test]
    fn test_unknown_style_names_the_input() {
        let err = FormpressError::UnknownStyle("fancy".to_string());
        assert!(err.to_string().contains("\"fancy\""));
    }
}
