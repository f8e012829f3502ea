/**
 * Error Conversion
 *
 * `From` implementations that give lower-layer errors their failure kind, and
 * the `IntoResponse` implementations used at the HTTP boundary.
 *
 * # Kind Assignment
 *
 * - `SharedError::ValidationError` -> `Validation`
 * - `SharedError::InvalidArgument` -> `InvalidArgument`
 * - axum JSON / query / path rejections -> `InvalidArgument`
 * - `jsonwebtoken` errors -> `Authentication`
 * - `sqlx` errors and everything else -> `Unclassified`
 *
 * Malformed JSON bodies, unparsable query or path values and unknown sort
 * properties answer 400 with the rejection text. They do not fall through to
 * the unclassified 500 catch-all.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Bad credentials",
 *   "status": 401
 * }
 * ```
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::classifier::FailureResponse;
use crate::backend::error::layer::PendingFailure;
use crate::backend::error::types::FailureEvent;
use crate::shared::error::SharedError;

impl From<SharedError> for FailureEvent {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { violations } => Self::validation(violations),
            SharedError::InvalidArgument { message } => Self::invalid_argument(message),
        }
    }
}

impl From<sqlx::Error> for FailureEvent {
    fn from(err: sqlx::Error) -> Self {
        Self::unclassified(err)
    }
}

impl From<jsonwebtoken::errors::Error> for FailureEvent {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::authentication(err.to_string())
    }
}

impl From<JsonRejection> for FailureEvent {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_argument(rejection.body_text())
    }
}

impl From<QueryRejection> for FailureEvent {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_argument(rejection.body_text())
    }
}

impl From<PathRejection> for FailureEvent {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_argument(rejection.body_text())
    }
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.body,
            "status": self.status.as_u16(),
        });
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for FailureEvent {
    /// Render the failure without logging and attach it for the classification layer
    ///
    /// The rendered response is already correct; the layer registered by
    /// [`register`](crate::backend::error::layer::register) replaces it with
    /// its own classification so that the injected log sink sees the failure.
    fn into_response(self) -> Response {
        let mut response = FailureResponse::for_event(&self).into_response();
        response.extensions_mut().insert(PendingFailure::new(self));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::types::FailureKind;
    use crate::shared::error::FieldViolation;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[test]
    fn test_from_shared_error() {
        let event: FailureEvent =
            SharedError::validation(vec![FieldViolation::new("name", "must not be blank")]).into();
        assert_eq!(event.kind(), FailureKind::Validation);

        let event: FailureEvent = SharedError::invalid_argument("bad id").into();
        assert_eq!(event.kind(), FailureKind::InvalidArgument);
    }

    #[test]
    fn test_shared_error_keeps_client_text() {
        let violations = vec![
            FieldViolation::new("name", "must not be blank"),
            FieldViolation::new("name", "size must be between 1 and 64"),
        ];
        match FailureEvent::from(SharedError::validation(violations.clone())) {
            FailureEvent::Validation { violations: converted } => assert_eq!(converted, violations),
            other => panic!("Expected Validation, got {:?}", other),
        }

        let event = FailureEvent::from(SharedError::invalid_argument("Page size must not be less than one"));
        assert_eq!(event.message(), "Page size must not be less than one");
    }

    #[test]
    fn test_from_sqlx_error() {
        let event: FailureEvent = sqlx::Error::PoolTimedOut.into();
        assert_eq!(event.kind(), FailureKind::Unclassified);
    }

    #[test]
    fn test_from_jwt_error() {
        let err = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
        let event: FailureEvent = err.into();
        assert_eq!(event.kind(), FailureKind::Authentication);
    }

    #[tokio::test]
    async fn test_event_response_body() {
        let response = FailureEvent::authorization("role USER").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.extensions().get::<PendingFailure>().is_some());

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "You are not authorized to access this resource.");
        assert_eq!(json["status"], 403);
    }
}
