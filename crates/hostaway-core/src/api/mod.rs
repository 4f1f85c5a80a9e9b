//! REST API client module for the Hostaway public API.
//!
//! This module provides the `ApiClient`, which attaches a bearer token
//! from the `TokenManager` to every request and, when the API answers
//! 401, invalidates the cached token, fetches a fresh one and resends the
//! request exactly once.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
