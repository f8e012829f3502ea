//! Locations Module
//!
//! The location resource: storage (`db`) and HTTP handlers (`handlers`).
//!
//! # Endpoints
//!
//! - `GET /api/locations` - Paged listing
//! - `GET /api/locations/{id}` - Lookup by id
//! - `GET /api/locations/code/{code}` - Lookup by location code
//! - `POST /api/locations` - Create (ADMIN)
//! - `PUT /api/locations/{id}` - Replace (ADMIN)
//! - `DELETE /api/locations/{id}` - Delete (ADMIN)

/// Location storage
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::LocationStore;
