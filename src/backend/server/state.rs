/**
 * Application State Management
 *
 * `AppState` is the router state shared by every handler. It is cheap to
 * clone: the store is a pool or an `Arc`, the rest sits behind `Arc`.
 *
 * The `FromRef` implementation lets handlers that only need the store extract
 * `State<LocationStore>` directly.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::TokenVerifier;
use crate::backend::locations::LocationStore;
use crate::shared::config::AppConfig;

/// Application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Location repository
    pub locations: LocationStore,
    /// Bearer-token verifier built from `config.jwt_secret`
    pub verifier: Arc<TokenVerifier>,
    /// Validated configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, locations: LocationStore) -> Self {
        Self {
            verifier: Arc::new(TokenVerifier::new(&config.jwt_secret)),
            locations,
            config: Arc::new(config),
        }
    }

    /// State backed by the in-memory location store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, LocationStore::in_memory())
    }
}

impl FromRef<AppState> for LocationStore {
    fn from_ref(state: &AppState) -> Self {
        state.locations.clone()
    }
}
