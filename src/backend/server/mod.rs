//! Server Module
//!
//! Initialization and shared state for the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig::load` (defaults, TOML file, environment)
//! 2. **Database**: optional pool, otherwise the in-memory store
//! 3. **State**: `AppState` with the store, token verifier and config
//! 4. **Router**: routes, auth middleware, failure classification, tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use waypoint::backend::server::create_app;
//! use waypoint::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::create_app;
pub use state::AppState;
