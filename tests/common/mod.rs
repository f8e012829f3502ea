//! Common test utilities and helpers
//!
//! - Test configuration and app construction
//! - Token helpers
//! - Custom assertion macros

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use uuid::Uuid;
use waypoint::backend::auth::{create_token, Role};
use waypoint::backend::error::{Classifier, MemoryFailureLog};
use waypoint::backend::locations::LocationStore;
use waypoint::backend::routes::create_router;
use waypoint::backend::server::AppState;
use waypoint::shared::AppConfig;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .max_page_size(50)
        .build()
        .expect("valid test config")
}

/// A server over `store` plus the log its classifier writes to
pub struct TestApp {
    pub server: TestServer,
    pub log: Arc<MemoryFailureLog>,
}

impl TestApp {
    pub fn with_store(store: LocationStore) -> Self {
        Self::from_state(AppState::new(test_config(), store))
    }

    pub fn in_memory() -> Self {
        Self::from_state(AppState::in_memory(test_config()))
    }

    fn from_state(state: AppState) -> Self {
        let log = Arc::new(MemoryFailureLog::new());
        let app = create_router(state, Classifier::new(log.clone()));
        let server = TestServer::new(app).expect("Failed to create test server");
        Self { server, log }
    }
}

pub fn token(role: Role) -> String {
    create_token(TEST_SECRET, Uuid::new_v4(), role, Duration::from_secs(300))
        .expect("Failed to create test token")
}

/// Authorization header carrying a fresh token for `role`
pub fn bearer(role: Role) -> (HeaderName, HeaderValue) {
    raw_authorization(&format!("Bearer {}", token(role)))
}

pub fn raw_authorization(value: &str) -> (HeaderName, HeaderValue) {
    (
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_str(value).expect("valid header value"),
    )
}

pub fn location_json(name: &str, city: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "country": "Netherlands",
        "city": city,
        "locationCode": code,
    })
}
