//! Backend Error Module
//!
//! Every failure raised while handling a request ends here. Handlers,
//! extractors and middleware return a [`FailureEvent`]; the [`Classifier`]
//! maps it to a status and body and writes one log record through an injected
//! [`FailureLog`], except for authentication and authorization failures which
//! are answered silently.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - FailureEvent and FailureKind
//! ├── classifier.rs - Classifier, FailureResponse, log sinks
//! ├── conversion.rs - From impls and IntoResponse
//! └── layer.rs      - Middleware registration and panic recovery
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use waypoint::backend::error::FailureEvent;
//!
//! async fn handler() -> Result<String, FailureEvent> {
//!     Err(FailureEvent::invalid_argument("bad id"))
//! }
//! ```

/// Failure type definitions
pub mod types;

/// Classification policy and log sinks
pub mod classifier;

/// Error conversion implementations
pub mod conversion;

/// Classification middleware
pub mod layer;

// Re-export commonly used types
pub use classifier::{
    Classifier, FailureLog, FailureRecord, FailureResponse, MemoryFailureLog, TracingFailureLog,
};
pub use types::{BoxError, FailureEvent, FailureKind};
