//! Authentication Module
//!
//! Bearer-token verification. Route protection lives in
//! [`middleware::auth`](crate::backend::middleware::auth); this module only
//! knows how tokens are signed and what they claim.

/// JWT issuing and verification
pub mod sessions;

pub use sessions::{create_token, Claims, Role, TokenVerifier};
