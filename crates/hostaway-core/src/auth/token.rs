//! Token lifecycle: acquisition, expiry-aware reuse and invalidation.

use chrono::Utc;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CachedToken, TokenCacheStore};

use super::{AuthError, Credentials};

/// Safety margin subtracted from the server-declared token lifetime (5 minutes).
/// Absorbs clock skew and in-flight request latency.
const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

/// Scope requested with every client-credentials grant
const TOKEN_SCOPE: &str = "general";

/// Path of the token endpoint relative to the API base URL
const TOKEN_PATH: &str = "accessTokens";

/// Token as issued by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl TokenEndpointResponse {
    fn reason(self) -> Option<String> {
        self.message.or(self.error_description).or(self.error)
    }
}

/// Token endpoint URL for an API base URL.
pub fn token_endpoint(api_base_url: &str) -> String {
    format!("{}/{}", api_base_url.trim_end_matches('/'), TOKEN_PATH)
}

/// Absolute expiry (ms since epoch) for a token issued at `now_ms` with a
/// server-declared lifetime of `expires_in_secs`, minus the safety buffer.
pub fn buffered_expiry(now_ms: i64, expires_in_secs: i64) -> i64 {
    now_ms
        .saturating_add(expires_in_secs.saturating_mul(1000))
        .saturating_sub(EXPIRY_BUFFER_MS)
}

/// Single source of truth for which token to use right now.
/// Sole reader and writer of the token cache.
pub struct TokenManager {
    client: Client,
    token_url: String,
    credentials: Credentials,
    store: TokenCacheStore,
}

impl TokenManager {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        credentials: Credentials,
        store: TokenCacheStore,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            credentials,
            store,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn store(&self) -> &TokenCacheStore {
        &self.store
    }

    fn cache_key(&self) -> String {
        cache_key(self.credentials.client_id())
    }

    /// Return a token valid for this client, fetching a new one on cache miss.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let key = self.cache_key();
        let mut cache = self.store.read_all();

        if let Some(cached) = cache.get(&key) {
            if cached.is_valid_for(self.credentials.client_id(), Utc::now().timestamp_millis()) {
                debug!(cache_key = %key, "Using cached access token");
                return Ok(cached.token.clone());
            }
            debug!(cache_key = %key, "Cached access token expired or issued to another client");
        }

        let issued = self.request_new_token().await?;
        let expiry = buffered_expiry(Utc::now().timestamp_millis(), issued.expires_in);

        cache.insert(
            key,
            CachedToken {
                token: issued.access_token.clone(),
                expiry,
                client_id: self.credentials.client_id().to_string(),
            },
        );

        // Persisting is best-effort once the token has been issued
        if let Err(e) = self.store.write_all(&cache) {
            warn!(error = %e, "Failed to persist access token");
        }

        Ok(issued.access_token)
    }

    /// Drop this client's cached token so the next lookup hits the network.
    pub async fn clear_token(&self) -> Result<(), AuthError> {
        let key = self.cache_key();
        let mut cache = self.store.read_all();
        cache.remove(&key);
        self.store.write_all(&cache)?;
        debug!(cache_key = %key, "Cleared cached access token");
        Ok(())
    }

    async fn request_new_token(&self) -> Result<TokenResponse, AuthError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
            ("scope", TOKEN_SCOPE),
        ];

        debug!(
            client_id = %self.credentials.client_id(),
            client_secret = %self.credentials.secret_preview(),
            "Requesting new access token"
        );

        let response = self
            .client
            .post(&self.token_url)
            .header(header::CACHE_CONTROL, "no-cache")
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        let parsed = serde_json::from_str::<TokenEndpointResponse>(&body);

        if !status.is_success() {
            let reason = parsed
                .ok()
                .and_then(TokenEndpointResponse::reason)
                .unwrap_or_else(|| format!("HTTP status {}", status));
            return Err(AuthError::Request(reason));
        }

        let mut parsed = parsed
            .map_err(|e| AuthError::Request(format!("Invalid token response: {}", e)))?;

        let Some(access_token) = parsed.access_token.take().filter(|t| !t.is_empty()) else {
            return Err(AuthError::Rejected(
                parsed.reason().unwrap_or_else(|| "Unknown error".to_string()),
            ));
        };

        let token = TokenResponse {
            access_token,
            expires_in: parsed.expires_in.unwrap_or_default(),
        };
        info!(
            client_id = %self.credentials.client_id(),
            expires_in = token.expires_in,
            "Obtained new access token"
        );
        Ok(token)
    }
}

// ============================================================================
// Tests
// ============================================================================
