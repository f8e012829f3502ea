//! Shared Error Types
//!
//! This module defines the domain-level errors raised by shared types such as
//! [`PageRequest`](crate::shared::page::PageRequest) and
//! [`NewLocation`](crate::shared::location::NewLocation). They carry no HTTP
//! knowledge; the backend converts them into failure events at the boundary.
//!
//! # Error Categories
//!
//! - `ValidationError` - One or more field constraint violations, in detection order
//! - `InvalidArgument` - A single bad argument with a client-facing message
//!
//! # Usage
//!
//! ```rust
//! use waypoint::shared::error::{FieldViolation, SharedError};
//!
//! let error = SharedError::validation(vec![FieldViolation::new("name", "must not be blank")]);
//! let error = SharedError::invalid_argument("Page size must not be less than one");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field constraint violation reported by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Name of the offending field as the client sent it
    pub field: String,
    /// Human-readable violation message
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field-level validation for request bodies
pub trait Validate {
    /// Report every violation, in field order, as a `ValidationError`
    fn validate(&self) -> Result<(), SharedError>;
}

/// Shared error types raised by domain code
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Field validation failed
    ///
    /// Violations keep the validator's detection order. The same field may
    /// appear more than once.
    #[error("Validation failed for {} field(s)", violations.len())]
    ValidationError {
        /// Ordered field violations
        violations: Vec<FieldViolation>,
    },

    /// An argument was outside its accepted range or format
    #[error("{message}")]
    InvalidArgument {
        /// Client-facing message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error from ordered violations
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::ValidationError { violations }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_order_and_duplicates() {
        let error = SharedError::validation(vec![
            FieldViolation::new("name", "must not be blank"),
            FieldViolation::new("name", "size must be between 1 and 64"),
            FieldViolation::new("city", "must not be blank"),
        ]);
        match error {
            SharedError::ValidationError { violations } => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "name", "city"]);
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_invalid_argument_display_is_message() {
        let error = SharedError::invalid_argument("bad id");
        assert_eq!(error.to_string(), "bad id");
    }

    #[test]
    fn test_validation_display_counts_fields() {
        let error = SharedError::validation(vec![FieldViolation::new("a", "x")]);
        assert_eq!(format!("{}", error), "Validation failed for 1 field(s)");
    }
}
