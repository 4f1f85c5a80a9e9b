//! Application configuration management.
//!
//! Settings come from built-in defaults, then an optional JSON file at
//! `~/.config/hostaway-mcp/config.json`, then environment variables
//! (`HOSTAWAY_API_BASE_URL`, `HOSTAWAY_CACHE_DIR`,
//! `HOSTAWAY_REQUEST_TIMEOUT_SECS`), later sources winning.
//!
//! The token cache lives at `~/.hostaway-mcp/token-cache.json` unless
//! `cache_dir` says otherwise.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "hostaway-mcp";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Cache directory name under the user's home
const CACHE_DIR_NAME: &str = ".hostaway-mcp";

/// Public Hostaway API
pub const DEFAULT_API_BASE_URL: &str = "https://api.hostaway.com/v1";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const API_BASE_URL_VAR: &str = "HOSTAWAY_API_BASE_URL";
pub const CACHE_DIR_VAR: &str = "HOSTAWAY_CACHE_DIR";
pub const REQUEST_TIMEOUT_VAR: &str = "HOSTAWAY_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub cache_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from the user config file (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Override settings from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(API_BASE_URL_VAR) {
            self.api_base_url = url;
        }
        if let Some(dir) = lookup(CACHE_DIR_VAR) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = lookup(REQUEST_TIMEOUT_VAR) {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", REQUEST_TIMEOUT_VAR))?;
        }
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the token cache file.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(CACHE_DIR_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"request_timeout_secs": 5}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{oops").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (API_BASE_URL_VAR, "http://localhost:9000/v1"),
            (CACHE_DIR_VAR, "/tmp/hostaway"),
            (REQUEST_TIMEOUT_VAR, "12"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:9000/v1");
        assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/tmp/hostaway"));
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let mut config = Config::default();
        let result = config.apply_env(|name| {
            (name == REQUEST_TIMEOUT_VAR).then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
