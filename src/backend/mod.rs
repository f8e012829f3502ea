//! Backend Module
//!
//! Server-side code: the Axum HTTP server, the location resource, bearer-token
//! authentication and the failure classifier that answers every error.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`locations`** - Location storage and handlers
//! - **`auth`** - JWT verification
//! - **`middleware`** - Request authentication
//! - **`extract`** - Validating body extractor
//! - **`error`** - Failure taxonomy, classifier and its middleware
//!
//! # Error Handling
//!
//! Handlers return `Result<T, FailureEvent>` and propagate with `?`. The
//! classification layer registered in `routes::router` maps each failure to a
//! status and body and logs it through the injected `FailureLog`:
//!
//! | Failure           | Status |
//! |-------------------|--------|
//! | Validation        | 400    |
//! | Invalid argument  | 400    |
//! | Authentication    | 401    |
//! | Authorization     | 403    |
//! | Anything else     | 500    |

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Location resource
pub mod locations;

/// Authentication
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Request extractors
pub mod extract;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::{Classifier, FailureEvent, FailureKind};
pub use locations::LocationStore;
pub use server::{create_app, AppState};
