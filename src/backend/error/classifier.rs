/**
 * Failure Classifier
 *
 * Maps every `FailureEvent` to exactly one `FailureResponse` and, for the
 * kinds operators care about, one log record.
 *
 * | Kind            | Status | Body                                               | Logged |
 * |-----------------|--------|----------------------------------------------------|--------|
 * | Validation      | 400    | `Validation failed: <field> - <message>; ...`      | yes    |
 * | InvalidArgument | 400    | the message verbatim                               | yes    |
 * | Authentication  | 401    | `Bad credentials`                                  | no     |
 * | Authorization   | 403    | `You are not authorized to access this resource.`  | no     |
 * | Unclassified    | 500    | `An unexpected error occurred.`                    | yes    |
 *
 * The classifier holds no mutable state. The log sink is injected as an
 * `Arc<dyn FailureLog>` shared read-only by every clone.
 */

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::StatusCode;

use crate::backend::error::types::{FailureEvent, FailureKind};
use crate::shared::error::FieldViolation;

pub const VALIDATION_PREFIX: &str = "Validation failed: ";
pub const BAD_CREDENTIALS: &str = "Bad credentials";
pub const NOT_AUTHORIZED: &str = "You are not authorized to access this resource.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// The status and body a client receives for a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FailureResponse {
    /// Pure mapping from a failure to its response
    pub fn for_event(event: &FailureEvent) -> Self {
        match event {
            FailureEvent::Validation { violations } => Self {
                status: StatusCode::BAD_REQUEST,
                body: validation_body(violations),
            },
            FailureEvent::InvalidArgument { message } => Self {
                status: StatusCode::BAD_REQUEST,
                body: message.clone(),
            },
            FailureEvent::Authentication { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                body: BAD_CREDENTIALS.to_string(),
            },
            FailureEvent::Authorization { .. } => Self {
                status: StatusCode::FORBIDDEN,
                body: NOT_AUTHORIZED.to_string(),
            },
            FailureEvent::Unclassified { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: UNEXPECTED_ERROR.to_string(),
            },
        }
    }
}

/// `Validation failed: ` followed by `<field> - <message>; ` for each violation
///
/// Order is preserved and nothing is deduplicated.
pub fn validation_body(violations: &[FieldViolation]) -> String {
    let mut body = String::from(VALIDATION_PREFIX);
    for violation in violations {
        body.push_str(&violation.field);
        body.push_str(" - ");
        body.push_str(&violation.message);
        body.push_str("; ");
    }
    body
}

/// Operator-facing diagnostic for one handled failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub kind: FailureKind,
    pub status: StatusCode,
    /// One-line summary
    pub summary: String,
    /// Violations for validation failures, the causal chain for unclassified ones
    pub details: Vec<String>,
}

impl FailureRecord {
    /// Build the log record for `event`, or `None` for the silent auth kinds
    pub fn for_event(event: &FailureEvent, response: &FailureResponse) -> Option<Self> {
        let (summary, details) = match event {
            FailureEvent::Validation { violations } => (
                format!("Validation error: {}", response.body),
                violations
                    .iter()
                    .map(|v| format!("{}: {}", v.field, v.message))
                    .collect(),
            ),
            FailureEvent::InvalidArgument { message } => {
                (format!("Illegal argument error: {}", message), Vec::new())
            }
            FailureEvent::Authentication { .. } | FailureEvent::Authorization { .. } => {
                return None
            }
            FailureEvent::Unclassified { .. } => (
                "Unexpected error occurred".to_string(),
                event.causal_chain(),
            ),
        };

        Some(Self {
            kind: event.kind(),
            status: response.status,
            summary,
            details,
        })
    }
}

/// Destination for failure log records
///
/// Implementations must not block; the classifier does not wait on them.
pub trait FailureLog: Send + Sync {
    fn record(&self, record: &FailureRecord);
}

/// Emits each record as an ERROR-level `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn record(&self, record: &FailureRecord) {
        tracing::error!(
            kind = %record.kind,
            status = record.status.as_u16(),
            details = ?record.details,
            "{}",
            record.summary
        );
    }
}

/// Keeps records in memory, for tests and diagnostics
#[derive(Debug, Default)]
pub struct MemoryFailureLog {
    records: Mutex<Vec<FailureRecord>>,
}

impl MemoryFailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records captured so far
    pub fn records(&self) -> Vec<FailureRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-pushed record behind.
    fn lock(&self) -> MutexGuard<'_, Vec<FailureRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FailureLog for MemoryFailureLog {
    fn record(&self, record: &FailureRecord) {
        self.lock().push(record.clone());
    }
}

/// Turns failures into responses and log records
///
/// Cloning is cheap; all clones share the same log sink.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use axum::http::StatusCode;
/// use waypoint::backend::error::{Classifier, FailureEvent, MemoryFailureLog};
///
/// let log = Arc::new(MemoryFailureLog::new());
/// let classifier = Classifier::new(log.clone());
///
/// let response = classifier.classify(&FailureEvent::invalid_argument("bad id"));
/// assert_eq!(response.status, StatusCode::BAD_REQUEST);
/// assert_eq!(response.body, "bad id");
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone)]
pub struct Classifier {
    log: Arc<dyn FailureLog>,
}

impl Classifier {
    pub fn new(log: Arc<dyn FailureLog>) -> Self {
        Self { log }
    }

    /// Classify `event`, writing at most one log record
    pub fn classify(&self, event: &FailureEvent) -> FailureResponse {
        let response = FailureResponse::for_event(event);
        if let Some(record) = FailureRecord::for_event(event, &response) {
            self.log.record(&record);
        }
        response
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Arc::new(TracingFailureLog))
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> (Classifier, Arc<MemoryFailureLog>) {
        let log = Arc::new(MemoryFailureLog::new());
        (Classifier::new(log.clone()), log)
    }

    #[derive(Debug, thiserror::Error)]
    #[error("pool timed out")]
    struct PoolTimeout;

    #[test]
    fn test_validation_body_and_status() {
        let (classifier, log) = classifier();
        let event = FailureEvent::validation(vec![
            FieldViolation::new("name", "must not be blank"),
            FieldViolation::new("age", "must be positive"),
        ]);

        let response = classifier.classify(&event);

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            "Validation failed: name - must not be blank; age - must be positive; "
        );
        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, FailureKind::Validation);
        assert_eq!(
            records[0].details,
            vec!["name: must not be blank", "age: must be positive"]
        );
    }

    #[test]
    fn test_validation_keeps_duplicate_fields() {
        let body = validation_body(&[
            FieldViolation::new("code", "must not be blank"),
            FieldViolation::new("code", "size must be between 1 and 16"),
        ]);
        assert_eq!(
            body,
            "Validation failed: code - must not be blank; code - size must be between 1 and 16; "
        );
    }

    #[test]
    fn test_validation_without_violations() {
        assert_eq!(validation_body(&[]), "Validation failed: ");
    }

    #[test]
    fn test_invalid_argument_verbatim() {
        let (classifier, log) = classifier();
        let response = classifier.classify(&FailureEvent::invalid_argument("bad id"));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, "bad id");
        assert_eq!(log.records()[0].summary, "Illegal argument error: bad id");
    }

    #[test]
    fn test_authentication_is_silent() {
        let (classifier, log) = classifier();
        let response =
            classifier.classify(&FailureEvent::authentication("token signature mismatch"));
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, "Bad credentials");
        assert!(log.is_empty());
    }

    #[test]
    fn test_authorization_is_silent() {
        let (classifier, log) = classifier();
        let response = classifier.classify(&FailureEvent::authorization("role USER"));
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(
            response.body,
            "You are not authorized to access this resource."
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_unclassified_hides_detail_but_logs_chain() {
        let (classifier, log) = classifier();
        let response = classifier.classify(&FailureEvent::unclassified(PoolTimeout));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, "An unexpected error occurred.");

        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary, "Unexpected error occurred");
        assert_eq!(records[0].details, vec!["pool timed out"]);
    }

    #[test]
    fn test_every_kind_has_a_response() {
        let (classifier, _log) = classifier();
        let events = [
            FailureEvent::validation(vec![FieldViolation::new("a", "b")]),
            FailureEvent::invalid_argument("x"),
            FailureEvent::authentication("x"),
            FailureEvent::authorization("x"),
            FailureEvent::unclassified(PoolTimeout),
        ];
        let statuses: Vec<u16> = events
            .iter()
            .map(|event| classifier.classify(event).status.as_u16())
            .collect();
        assert_eq!(statuses, vec![400, 400, 401, 403, 500]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let (classifier, log) = classifier();
        let event = FailureEvent::validation(vec![FieldViolation::new("city", "must not be blank")]);
        let first = classifier.classify(&event);
        let second = classifier.classify(&event);
        assert_eq!(first, second);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_tracing_log_does_not_panic_without_subscriber() {
        let classifier = Classifier::default();
        let response = classifier.classify(&FailureEvent::invalid_argument("bad id"));
        assert_eq!(response.body, "bad id");
    }

    #[test]
    fn test_memory_log_survives_poisoned_lock() {
        let (classifier, log) = classifier();
        classifier.classify(&FailureEvent::invalid_argument("before"));

        let poisoner = log.clone();
        let result = std::thread::spawn(move || {
            let _guard = poisoner.records.lock().unwrap();
            panic!("recorder failed");
        })
        .join();
        assert!(result.is_err());
        assert!(log.records.is_poisoned());

        classifier.classify(&FailureEvent::invalid_argument("after"));

        let summaries: Vec<String> = log.records().into_iter().map(|r| r.summary).collect();
        assert_eq!(
            summaries,
            vec!["Illegal argument error: before", "Illegal argument error: after"]
        );
        assert_eq!(log.len(), 2);
        assert!(!log.is_empty());
    }
}
