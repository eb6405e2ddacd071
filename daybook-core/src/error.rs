//! Error types for daybook.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path, e.g. `startTime` or `$` for the payload itself
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Input failed schema checks. Carries every failing field, not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", join_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            fields: vec![FieldError::new(path, message)],
        }
    }

    /// Field paths that failed, in the order they were checked.
    pub fn paths(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.path.as_str()).collect()
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_field() {
        let err = ValidationError {
            fields: vec![
                FieldError::new("title", "is required"),
                FieldError::new("date", "must be YYYY-MM-DD"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Validation failed: title: is required; date: must be YYYY-MM-DD"
        );
        assert_eq!(err.paths(), vec!["title", "date"]);
    }
}
