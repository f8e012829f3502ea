/**
 * Failure Classification Layer
 *
 * The explicit registration point that routes failures to the classifier.
 * `register` wraps a router with two layers:
 *
 * 1. `classify_failures` - picks up the `FailureEvent` attached by
 *    `FailureEvent::into_response` and replaces the response with the
 *    classifier's output, writing the log record on the way.
 * 2. `CatchPanicLayer` - converts a panicking handler into an unclassified
 *    failure so no request ends without a response.
 *
 * `register` must be called after every route (and the fallback) has been
 * added, since axum layers only wrap routes that already exist.
 */

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::backend::error::classifier::Classifier;
use crate::backend::error::types::FailureEvent;

/// A failure waiting to be classified, carried in response extensions
#[derive(Debug, Clone)]
pub struct PendingFailure(Arc<FailureEvent>);

impl PendingFailure {
    pub fn new(event: FailureEvent) -> Self {
        Self(Arc::new(event))
    }

    pub fn event(&self) -> &FailureEvent {
        &self.0
    }
}

/// Middleware that classifies failures returned by inner handlers
pub async fn classify_failures(
    State(classifier): State<Classifier>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<PendingFailure>() {
        Some(pending) => classifier.classify(pending.event()).into_response(),
        None => response,
    }
}

/// Install failure classification and panic recovery on `router`
///
/// # Example
///
/// ```rust
/// use axum::{routing::get, Router};
/// use waypoint::backend::error::{layer, Classifier, FailureEvent};
///
/// async fn handler() -> Result<&'static str, FailureEvent> {
///     Err(FailureEvent::invalid_argument("bad id"))
/// }
///
/// let router: Router = Router::new().route("/", get(handler));
/// let router = layer::register(router, Classifier::default());
/// ```
pub fn register<S>(router: Router<S>, classifier: Classifier) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let panic_classifier = classifier.clone();

    router
        .layer(middleware::from_fn_with_state(classifier, classify_failures))
        .layer(CatchPanicLayer::custom(
            move |payload: Box<dyn Any + Send + 'static>| {
                panic_classifier
                    .classify(&FailureEvent::from_panic(payload))
                    .into_response()
            },
        ))
}
