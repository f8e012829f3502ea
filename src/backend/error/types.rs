/**
 * Failure Event Types
 *
 * This module defines the failures that handlers, extractors and middleware
 * hand to the classifier. A failure is created where something goes wrong,
 * travels up the call chain unchanged as an `Err` value, and is consumed once
 * at the HTTP boundary.
 *
 * # Failure Kinds
 *
 * - `Validation` - Field constraint violations, in detection order
 * - `InvalidArgument` - A rejected argument with a client-facing message
 * - `Authentication` - Missing or unverifiable credentials
 * - `Authorization` - Verified caller lacking the required permission
 * - `Unclassified` - Anything else; the catch-all
 */

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::shared::error::{FieldViolation, SharedError};

/// Boxed error accepted by [`FailureEvent::from_boxed`]
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// The fixed classification taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Validation,
    InvalidArgument,
    Authentication,
    Authorization,
    Unclassified,
}

impl FailureKind {
    pub const ALL: [FailureKind; 5] = [
        FailureKind::Validation,
        FailureKind::InvalidArgument,
        FailureKind::Authentication,
        FailureKind::Authorization,
        FailureKind::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvalidArgument => "invalid_argument",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure raised during request handling
///
/// Handlers return `Result<T, FailureEvent>`; the classification middleware
/// turns the `Err` side into the client response and the operator log record.
///
/// # Usage
///
/// ```rust
/// use waypoint::backend::error::{FailureEvent, FailureKind};
///
/// let err = FailureEvent::invalid_argument("bad id");
/// assert_eq!(err.kind(), FailureKind::InvalidArgument);
///
/// let err = FailureEvent::authorization("role USER may not delete locations");
/// assert_eq!(err.kind(), FailureKind::Authorization);
/// ```
#[derive(Debug, Clone, Error)]
pub enum FailureEvent {
    /// One or more request fields failed validation
    #[error("Validation failed for {} field(s)", violations.len())]
    Validation {
        /// Ordered violations; duplicates per field are kept
        violations: Vec<FieldViolation>,
    },

    /// An argument was rejected
    #[error("{message}")]
    InvalidArgument {
        /// Client-facing message, echoed verbatim
        message: String,
    },

    /// Credentials were missing or could not be verified
    ///
    /// The message is for in-process diagnostics only and never reaches the client.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The caller is known but not permitted
    ///
    /// The message is for in-process diagnostics only and never reaches the client.
    #[error("Authorization denied: {message}")]
    Authorization { message: String },

    /// Any failure without a more specific kind
    #[error("{source}")]
    Unclassified {
        /// The original error, including its causal chain
        source: Arc<dyn StdError + Send + Sync>,
    },
}

impl FailureEvent {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error as the catch-all kind
    ///
    /// Use [`FailureEvent::from_boxed`] instead when the error may already be
    /// one of the crate's own error types.
    pub fn unclassified(source: impl Into<BoxError>) -> Self {
        Self::Unclassified {
            source: Arc::from(source.into()),
        }
    }

    /// Classify an opaque error, preferring the most specific kind
    ///
    /// Recognised types are unwrapped in this order: `FailureEvent` itself,
    /// [`SharedError`], `jsonwebtoken` errors. Everything else becomes
    /// `Unclassified`.
    pub fn from_boxed(err: BoxError) -> Self {
        let err = match err.downcast::<FailureEvent>() {
            Ok(event) => return *event,
            Err(err) => err,
        };
        let err = match err.downcast::<SharedError>() {
            Ok(shared) => return (*shared).into(),
            Err(err) => err,
        };
        let err = match err.downcast::<jsonwebtoken::errors::Error>() {
            Ok(jwt) => return (*jwt).into(),
            Err(err) => err,
        };
        Self::unclassified(err)
    }

    /// Convert a caught panic payload into the catch-all kind
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::unclassified(HandlerPanic(message))
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation { .. } => FailureKind::Validation,
            Self::InvalidArgument { .. } => FailureKind::InvalidArgument,
            Self::Authentication { .. } => FailureKind::Authentication,
            Self::Authorization { .. } => FailureKind::Authorization,
            Self::Unclassified { .. } => FailureKind::Unclassified,
        }
    }

    /// Human-readable message for diagnostics
    pub fn message(&self) -> String {
        match self {
            Self::InvalidArgument { message }
            | Self::Authentication { message }
            | Self::Authorization { message } => message.clone(),
            _ => self.to_string(),
        }
    }

    /// Display strings of the error and each of its sources, outermost first
    pub fn causal_chain(&self) -> Vec<String> {
        match self {
            Self::Unclassified { source } => {
                let mut chain = Vec::new();
                let mut current: Option<&(dyn StdError + 'static)> = Some(source.as_ref());
                while let Some(err) = current {
                    chain.push(err.to_string());
                    current = err.source();
                }
                chain
            }
            _ => vec![self.to_string()],
        }
    }
}

/// A panic caught while a handler was running
#[derive(Debug, Error)]
#[error("handler panicked: {0}")]
pub struct HandlerPanic(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Reset;

    #[derive(Debug, Error)]
    #[error("query failed")]
    struct QueryFailed(#[source] Reset);

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(
            FailureEvent::validation(vec![]).kind(),
            FailureKind::Validation
        );
        assert_eq!(
            FailureEvent::invalid_argument("x").kind(),
            FailureKind::InvalidArgument
        );
        assert_eq!(
            FailureEvent::authentication("x").kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            FailureEvent::authorization("x").kind(),
            FailureKind::Authorization
        );
        assert_eq!(
            FailureEvent::unclassified(Reset).kind(),
            FailureKind::Unclassified
        );
    }

    #[test]
    fn test_from_boxed_prefers_specific_kinds() {
        let boxed: BoxError = Box::new(FailureEvent::authorization("no"));
        assert_eq!(FailureEvent::from_boxed(boxed).kind(), FailureKind::Authorization);

        let boxed: BoxError = Box::new(SharedError::invalid_argument("bad id"));
        assert_matches!(
            FailureEvent::from_boxed(boxed),
            FailureEvent::InvalidArgument { message } if message == "bad id"
        );

        let boxed: BoxError = Box::new(Reset);
        assert_eq!(FailureEvent::from_boxed(boxed).kind(), FailureKind::Unclassified);
    }

    #[test]
    fn test_causal_chain() {
        let event = FailureEvent::unclassified(QueryFailed(Reset));
        assert_eq!(event.causal_chain(), vec!["query failed", "connection reset"]);
    }

    #[test]
    fn test_from_panic_payloads() {
        let event = FailureEvent::from_panic(Box::new("boom"));
        assert_eq!(event.to_string(), "handler panicked: boom");

        let event = FailureEvent::from_panic(Box::new(String::from("bang")));
        assert_eq!(event.to_string(), "handler panicked: bang");

        let event = FailureEvent::from_panic(Box::new(7_u32));
        assert_eq!(event.kind(), FailureKind::Unclassified);
    }

    #[test]
    fn test_message() {
        assert_eq!(FailureEvent::invalid_argument("bad id").message(), "bad id");
        assert_eq!(
            FailureEvent::validation(vec![FieldViolation::new("a", "b")]).message(),
            "Validation failed for 1 field(s)"
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FailureKind::InvalidArgument.to_string(), "invalid_argument");
        let names: Vec<&str> = FailureKind::ALL.iter().map(FailureKind::as_str).collect();
        assert_eq!(
            names,
            vec!["validation", "invalid_argument", "authentication", "authorization", "unclassified"]
        );
    }
}
