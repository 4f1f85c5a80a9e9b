use thiserror::Error;

use crate::cache::CacheError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint was unreachable or answered with an error status.
    #[error("Auth request failed: {0}")]
    Request(String),

    /// The token endpoint answered but did not issue an access token.
    #[error("Failed to get access token: {0}")]
    Rejected(String),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
