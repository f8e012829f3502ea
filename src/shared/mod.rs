//! Shared Module
//!
//! Types with no HTTP or database knowledge: the location model, pagination,
//! domain errors and application configuration. The backend builds on these.

/// Shared error types
pub mod error;

/// Location entity and write model
pub mod location;

/// Pagination requests and page envelopes
pub mod page;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{FieldViolation, SharedError, Validate};
pub use location::{Location, NewLocation};
pub use page::{Direction, Page, PageParams, PageRequest, Sort};
