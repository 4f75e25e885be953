//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction and field validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' exceeds maximum length of {max}, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_field_name() {
        let err = ValidationError::empty_field("summary");
        assert_eq!(err.to_string(), "Field 'summary' cannot be empty");
    }

    #[test]
    fn too_long_displays_lengths() {
        let err = ValidationError::too_long("summary", 255, 300);
        assert!(err.to_string().contains("255"));
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn invalid_format_displays_reason() {
        let err = ValidationError::invalid_format("due_date", "expected YYYY-MM-DD");
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
    }
}
