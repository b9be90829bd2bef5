//! Configuration for the persistence layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Rows per upsert request
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Environment variables holding the REST endpoint, highest priority first
pub const URL_ENV_VARS: &[&str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];

/// Environment variables holding the REST API key, highest priority first
pub const KEY_ENV_VARS: &[&str] = &["SUPABASE_KEY", "SUPABASE_SERVICE_ROLE_KEY"];

/// Configuration for the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// REST endpoint base URL (e.g. "https://xyz.supabase.co")
    pub url: String,

    /// API key sent as both `apikey` and bearer token
    pub api_key: String,

    /// Rows per upsert request
    pub chunk_size: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Base directory for the JSON file backend
    pub data_dir: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout_secs: 30,
            data_dir: PathBuf::from("./data/tables"),
        }
    }
}

impl PersistenceConfig {
    /// Create a REST configuration from an endpoint and key
    pub fn rest(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { url: url.into(), api_key: api_key.into(), ..Default::default() }
    }

    /// Load configuration from environment variables.
    ///
    /// Credentials may be missing here; [`validate_rest`](Self::validate_rest)
    /// rejects them before any backend is built.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
                .unwrap_or_default()
        };

        let mut config = Self { url: first_set(URL_ENV_VARS), api_key: first_set(KEY_ENV_VARS), ..Default::default() };

        if let Some(timeout) = lookup("PERSISTENCE_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().unwrap_or(30);
        }

        if let Some(dir) = lookup("PERSISTENCE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate settings shared by every backend
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Validate settings required by the REST backend
    pub fn validate_rest(&self) -> Result<(), String> {
        self.validate()?;

        if self.url.trim().is_empty() {
            return Err("REST endpoint URL is missing".to_string());
        }

        if self.api_key.trim().is_empty() {
            return Err("REST API key is missing".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PersistenceConfig::default();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
        assert!(config.validate_rest().is_err());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("NEXT_PUBLIC_SUPABASE_URL", "https://public.supabase.co"),
            ("SUPABASE_KEY", ""),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]
        .into_iter()
        .collect();

        let config = PersistenceConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.url, "https://public.supabase.co");
        assert_eq!(config.api_key, "service-key");
        assert!(config.validate_rest().is_ok());

        let config = PersistenceConfig::from_lookup(|name| {
            (name == "SUPABASE_URL").then(|| "https://primary.supabase.co".to_string())
        });
        assert_eq!(config.url, "https://primary.supabase.co");
        assert!(config.validate_rest().is_err());
    }

    #[test]
    fn test_rest_validation() {
        assert!(PersistenceConfig::rest("https://example.supabase.co", "key").validate_rest().is_ok());
        assert!(PersistenceConfig::rest("", "key").validate_rest().is_err());
        assert!(PersistenceConfig::rest("https://example.supabase.co", " ").validate_rest().is_err());

        let config = PersistenceConfig { chunk_size: 0, ..PersistenceConfig::rest("u", "k") };
        assert!(config.validate_rest().is_err());
    }
}
