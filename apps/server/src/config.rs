//! Server configuration.
//!
//! Loaded once at startup from environment variables with fallback to
//! defaults, then never mutated.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SALESDESK_HOST` | `0.0.0.0` |
//! | `SALESDESK_PORT` | `3000` |
//! | `SALESDESK_DB_PATH` | `./salesdesk.db` |
//! | `SALESDESK_DB_MAX_CONNECTIONS` | `5` |

use std::path::PathBuf;

use salesdesk_db::DbConfig;

pub const ENV_HOST: &str = "SALESDESK_HOST";
pub const ENV_PORT: &str = "SALESDESK_PORT";
pub const ENV_DB_PATH: &str = "SALESDESK_DB_PATH";
pub const ENV_DB_MAX_CONNECTIONS: &str = "SALESDESK_DB_MAX_CONNECTIONS";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// HTTP port.
    pub port: u16,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// Pool size.
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: PathBuf::from("./salesdesk.db"),
            db_max_connections: 5,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Unset and empty values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = ServerConfig::default();

        let config = ServerConfig {
            host: get(ENV_HOST).unwrap_or(defaults.host),

            port: match get(ENV_PORT) {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(ENV_PORT.to_string()))?,
                None => defaults.port,
            },

            database_path: get(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: match get(ENV_DB_MAX_CONNECTIONS) {
                Some(v) => v
                    .trim()
                    .parse()
                    .ok()
                    .filter(|n: &u32| *n > 0)
                    .ok_or_else(|| ConfigError::InvalidValue(ENV_DB_MAX_CONNECTIONS.to_string()))?,
                None => defaults.db_max_connections,
            },
        };

        Ok(config)
    }

    /// Returns the `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, "8080"),
            (ENV_DB_PATH, "/var/lib/salesdesk/data.db"),
            (ENV_DB_MAX_CONNECTIONS, "8"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("/var/lib/salesdesk/data.db"));
        assert_eq!(config.db_config().max_connections, 8);
    }

    #[test]
    fn test_empty_value_uses_default() {
        let config = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "  ")])).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "http")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SALESDESK_PORT");

        let err = ServerConfig::from_lookup(lookup(&[(ENV_DB_MAX_CONNECTIONS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var) if var == ENV_DB_MAX_CONNECTIONS));
    }
}
