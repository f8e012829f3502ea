//! Waypoint - Location Service Backend
//!
//! Waypoint is the backend of a location / transportation CRUD service built
//! on Axum. Its central piece is the failure classifier: every error raised
//! while handling a request, from a bad page size to a database outage, is
//! mapped to one deterministic HTTP response and, where operators need it, one
//! log record.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP or database knowledge
//!   - Location model and validation
//!   - Pagination requests and page envelopes
//!   - Domain errors, configuration
//!
//! - **`backend`** - Server-side code
//!   - Axum router, handlers and middleware
//!   - PostgreSQL / in-memory location store
//!   - Bearer-token verification
//!   - Failure classification
//!
//! # Usage
//!
//! ```rust,no_run
//! use waypoint::backend::server::create_app;
//! use waypoint::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All state is shared through `Arc`, a connection pool, or a `tokio` lock.
//! The classifier holds no mutable state and may be invoked from any number of
//! requests at once.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
