/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Layer Order (outermost first)
 *
 * 1. `TraceLayer` - per-request span, so failure log records carry request context
 * 2. Panic recovery and failure classification (`error::layer::register`)
 * 3. Per-route authentication (`require_auth`, on API routes only)
 */

use axum::{http::StatusCode, response::Json, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::{layer, Classifier};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// - `GET /health` - Public liveness probe
/// - `/api/...` - See [`configure_api_routes`]
/// - Fallback - `404 Not Found`
pub fn create_router(app_state: AppState, classifier: Classifier) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    // Add API routes
    let router = configure_api_routes(router, app_state.clone());

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    // Must come after every route so the layers wrap all of them
    let router = layer::register(router, classifier);

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
