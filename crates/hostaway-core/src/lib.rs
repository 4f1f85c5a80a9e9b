//! Hostaway core - token lifecycle, token cache and authenticated API client.
//!
//! This crate owns everything with real state in hostaway-mcp: acquiring
//! OAuth2 client-credentials tokens, caching them on disk per client
//! identity, and applying them to outbound API calls with a single
//! refresh-and-retry on authorization failure.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, Credentials, TokenManager};
pub use cache::{CacheError, TokenCacheStore};
pub use config::Config;
