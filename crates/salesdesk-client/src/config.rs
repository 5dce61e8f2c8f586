//! Client configuration

use std::time::Duration;

pub const ENV_API_URL: &str = "SALESDESK_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "SALESDESK_API_TIMEOUT_SECS";

/// Where and how the client talks to the server.
///
/// Resolved once and owned by the [`SalesClient`](crate::SalesClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000"), without the `/api` prefix
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `SALESDESK_API_URL` and `SALESDESK_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through `lookup`; unset and empty values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let base_url = match get(ENV_API_URL) {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidValue(ENV_API_URL.to_string()));
                }
                url
            }
            None => defaults.base_url,
        };

        let timeout = match get(ENV_API_TIMEOUT_SECS) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidValue(ENV_API_TIMEOUT_SECS.to_string()))?,
            None => defaults.timeout,
        };

        Ok(Self { base_url, timeout })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://sales.example.lk/"),
            (ENV_API_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://sales.example.lk");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "sales.example.lk")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SALESDESK_API_URL");

        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var) if var == ENV_API_TIMEOUT_SECS));
    }
}
