/**
 * Server Initialization
 *
 * Builds the application router from configuration:
 *
 * 1. Load the optional database pool
 * 2. Choose the location store (PostgreSQL or in-memory)
 * 3. Create the classifier with the `tracing` failure log
 * 4. Create the router with all routes and layers
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::error::{Classifier, TracingFailureLog};
use crate::backend::locations::LocationStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing Waypoint backend server");

    let locations = match load_database(config.database_url.as_deref()).await {
        Some(pool) => LocationStore::postgres(pool),
        None => LocationStore::in_memory(),
    };

    let app_state = AppState::new(config, locations);
    let classifier = Classifier::new(Arc::new(TracingFailureLog));

    let app = create_router(app_state, classifier);
    tracing::info!("Router configured");

    app
}
