use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

/// Token cache file name inside the cache directory
const CACHE_FILE: &str = "token-cache.json";

/// Number of hex characters kept from the SHA-256 digest of a client id.
const CACHE_KEY_LEN: usize = 16;

/// Mapping from cache key to the token last issued for that identity.
pub type TokenCache = BTreeMap<String, CachedToken>;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to write token cache {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode token cache: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    pub token: String,
    /// Absolute expiry in milliseconds since the Unix epoch, already buffered.
    pub expiry: i64,
    #[serde(rename = "clientId")]
    pub client_id: String,
}

impl CachedToken {
    /// An entry is usable only for the identity that obtained it and only
    /// strictly before its expiry.
    pub fn is_valid_for(&self, client_id: &str, now_ms: i64) -> bool {
        self.client_id == client_id && now_ms < self.expiry
    }
}

/// Derive the cache key for a client id: truncated lowercase hex SHA-256.
pub fn cache_key(client_id: &str) -> String {
    let digest = Sha256::digest(client_id.as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(CACHE_KEY_LEN);
    key
}

/// Single-file persistence for the token cache.
#[derive(Debug, Clone)]
pub struct TokenCacheStore {
    cache_dir: PathBuf,
}

impl TokenCacheStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE)
    }

    /// Load the whole mapping. Missing, unreadable or malformed files all
    /// yield an empty cache.
    pub fn read_all(&self) -> TokenCache {
        let path = self.cache_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No token cache file yet");
                return TokenCache::new();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read token cache, ignoring");
                return TokenCache::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse token cache, ignoring");
                TokenCache::new()
            }
        }
    }

    /// Replace the cache file with `cache`, creating the directory if needed.
    pub fn write_all(&self, cache: &TokenCache) -> Result<(), CacheError> {
        let path = self.cache_path();
        fs::create_dir_all(&self.cache_dir).map_err(|source| CacheError::Io {
            path: self.cache_dir.clone(),
            source,
        })?;

        let contents = serde_json::to_string_pretty(cache)?;
        fs::write(&path, contents).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&path, fs::Permissions::from_mode(0o600)) {
                warn!(path = %path.display(), error = %e, "Failed to restrict token cache permissions");
            }
        }

        debug!(path = %path.display(), entries = cache.len(), "Wrote token cache");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
