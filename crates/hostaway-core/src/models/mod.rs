//! Data models for Hostaway API payloads.
//!
//! - `Listing`: property listings
//! - `ListingsQuery`, `SortOrder`: filters for the listings search
//! - `ApiResponse`: the `{status, result}` envelope every endpoint returns
//!
//! Pricing settings and bed types stay as `serde_json::Value`.

pub mod listing;
pub mod query;
pub mod response;

pub use listing::Listing;
pub use query::{ListingsQuery, SortOrder};
pub use response::ApiResponse;
