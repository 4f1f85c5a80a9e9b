//! Authentication module for the Hostaway client-credentials flow.
//!
//! This module provides:
//! - `Credentials`: the client id/secret pair supplied at startup
//! - `TokenManager`: token acquisition, expiry-aware reuse and invalidation
//!
//! Tokens are cached on disk per client identity and treated as expired
//! five minutes before the server-declared lifetime ends.

pub mod credentials;
pub mod error;
pub mod token;

pub use credentials::Credentials;
pub use error::AuthError;
pub use token::{TokenManager, TokenResponse};
