//! On-disk token cache.
//!
//! This module provides the `TokenCacheStore`, a single JSON file mapping a
//! client-identity fingerprint to the last token issued for that identity.
//! The cache is a pure optimization: reads fail open to an empty mapping,
//! and the whole file is rewritten on every write (last writer wins).

pub mod store;

pub use store::{cache_key, CacheError, CachedToken, TokenCache, TokenCacheStore};
