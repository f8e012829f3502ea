//! Routes Module
//!
//! HTTP route configuration.
//!
//! - **`router`** - Assembles the full router and its layers
//! - **`api_routes`** - Authenticated `/api` routes

/// Main router assembly
pub mod router;

/// API routes
pub mod api_routes;

pub use router::create_router;
