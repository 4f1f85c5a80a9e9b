//! API client for the Hostaway public REST API.
//!
//! Every request goes through `send_authorized`, which attaches the current
//! bearer token and, on a 401, invalidates it and resends the same request
//! with a freshly acquired token exactly once.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::token::token_endpoint;
use crate::auth::{Credentials, TokenManager};
use crate::cache::TokenCacheStore;
use crate::config::Config;
use crate::models::{ApiResponse, Listing, ListingsQuery};

use super::ApiError;

/// API client for Hostaway.
/// Clone is cheap - the HTTP client and token manager are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<TokenManager>,
}

impl ApiClient {
    /// Create a client for `config`, caching tokens under its cache directory
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let store = TokenCacheStore::new(config.cache_dir()?);
        let tokens = TokenManager::new(
            client.clone(),
            token_endpoint(&config.api_base_url),
            credentials,
            store,
        );
        Ok(Self::with_token_manager(client, &config.api_base_url, tokens))
    }

    pub fn with_token_manager(client: Client, base_url: &str, tokens: TokenManager) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(tokens),
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send `request` with the current token, recovering once from a 401.
    /// The retried response is returned whatever its status.
    async fn send_authorized(&self, request: Request) -> Result<Response, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self.execute_with_token(&request, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        warn!(url = %request.url(), "Access token rejected, refreshing and retrying once");
        self.tokens.clear_token().await?;
        let token = self.tokens.access_token().await?;
        self.execute_with_token(&request, &token).await
    }

    async fn execute_with_token(&self, request: &Request, token: &str) -> Result<Response, ApiError> {
        let mut attempt = request
            .try_clone()
            .ok_or_else(|| ApiError::InvalidRequest("request body cannot be resent".to_string()))?;

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ApiError::InvalidRequest("access token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        attempt.headers_mut().insert(header::AUTHORIZATION, value);

        Ok(self.client.execute(attempt).await?)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut builder = self
            .client
            .get(self.url(path))
            .header(header::ACCEPT, "application/json");
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let request = builder.build()?;

        debug!(url = %request.url(), "GET");
        let response = self.send_authorized(request).await?;
        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        let envelope: ApiResponse<Value> = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from /{}: {}", path, e))
        })?;

        if envelope.is_failure() {
            return Err(ApiError::InvalidResponse(format!(
                "API returned status '{}': {}",
                envelope.status,
                envelope.message.as_deref().unwrap_or("no message")
            )));
        }

        // A missing result is handed on as null; the caller's type decides if that is valid
        let result = envelope.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected result from /{}: {}", path, e))
        })
    }

    // ===== Data Fetching Methods =====

    /// Search listings with optional filters
    pub async fn fetch_listings(&self, query: &ListingsQuery) -> Result<Vec<Listing>, ApiError> {
        self.get("listings", Some(query)).await
    }

    /// Fetch a single listing by id
    pub async fn fetch_listing(&self, listing_id: i64) -> Result<Listing, ApiError> {
        self.get::<_, ()>(&format!("listings/{}", listing_id), None).await
    }

    /// Fetch pricing settings for a listing
    pub async fn fetch_pricing_settings(&self, listing_id: i64) -> Result<Value, ApiError> {
        self.get::<_, ()>(&format!("listing/pricingSettings/{}", listing_id), None)
            .await
    }

    /// Fetch the bed type catalog
    pub async fn fetch_bed_types(&self) -> Result<Vec<Value>, ApiError> {
        self.get::<_, ()>("bedTypes", None).await
    }
}

// ============================================================================
// Tests
// ============================================================================
