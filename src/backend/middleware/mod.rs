//! Middleware Module
//!
//! Request-processing middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! Failure classification is middleware too, but it is registered through
//! [`error::layer::register`](crate::backend::error::layer::register) because
//! it wraps the whole router rather than individual routes.

pub mod auth;

pub use auth::{require_auth, AuthUser, AuthenticatedUser};
