use std::fmt;

use anyhow::{bail, Result};

use crate::utils::preview;

/// Environment variable holding the Hostaway client (account) id
pub const CLIENT_ID_VAR: &str = "HOSTAWAY_CLIENT_ID";

/// Environment variable holding the Hostaway client secret
pub const CLIENT_SECRET_VAR: &str = "HOSTAWAY_CLIENT_SECRET";

/// Characters of the secret shown in diagnostics
const SECRET_PREVIEW_CHARS: usize = 4;

/// OAuth2 client credentials. Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read credentials from `HOSTAWAY_CLIENT_ID` / `HOSTAWAY_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var(CLIENT_ID_VAR).unwrap_or_default();
        let client_secret = std::env::var(CLIENT_SECRET_VAR).unwrap_or_default();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            bail!(
                "{} and {} environment variables are required",
                CLIENT_ID_VAR,
                CLIENT_SECRET_VAR
            );
        }
        Ok(Self::new(client_id, client_secret))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Truncated secret for diagnostics
    pub fn secret_preview(&self) -> String {
        preview(&self.client_secret, SECRET_PREVIEW_CHARS)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.secret_preview())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("abc", "super-secret-value-1234");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("abc"));
        assert!(debug.contains("supe..."));
        assert!(!debug.contains("super-secret-value-1234"));
    }

    #[test]
    fn test_accessors() {
        let creds = Credentials::new("abc", "xyz");
        assert_eq!(creds.client_id(), "abc");
        assert_eq!(creds.client_secret(), "xyz");
        assert_eq!(creds.secret_preview(), "***");
    }
}
