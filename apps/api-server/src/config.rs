//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use quill_infra::DatabaseConfig;

/// Variables that must be present for the server to start.
const REQUIRED: [&str; 5] = ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME", "DB_PORT"];

/// Configuration errors. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Upper bound applied to the `limit` query parameter of list endpoints.
    pub max_page_size: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let missing: Vec<&'static str> = REQUIRED
            .into_iter()
            .filter(|&key| lookup(key).is_none_or(|v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let required = |key: &str| lookup(key).unwrap_or_default();

        let database = DatabaseConfig {
            host: required("DB_HOST"),
            port: parse(&lookup, "DB_PORT")?.unwrap_or_default(),
            user: required("DB_USER"),
            password: required("DB_PASSWORD"),
            name: required("DB_NAME"),
            max_connections: parse(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(20),
            min_connections: parse(&lookup, "DB_MIN_CONNECTIONS")?.unwrap_or(2),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&lookup, "PORT")?.unwrap_or(3000),
            database,
            max_page_size: parse(&lookup, "MAX_PAGE_SIZE")?.unwrap_or(100),
        })
    }
}

/// Parse an optional variable; present but malformed is an error.
fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const COMPLETE: [(&str, &str); 5] = [
        ("DB_HOST", "localhost"),
        ("DB_USER", "quill"),
        ("DB_PASSWORD", "secret"),
        ("DB_NAME", "quill"),
        ("DB_PORT", "5432"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&COMPLETE)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.min_connections, 2);
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[("DB_HOST", "localhost")])).unwrap_err();

        match err {
            ConfigError::Missing(keys) => {
                assert_eq!(keys, vec!["DB_USER", "DB_PASSWORD", "DB_NAME", "DB_PORT"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut pairs = COMPLETE.to_vec();
        pairs[2] = ("DB_PASSWORD", "");

        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(keys) if keys == vec!["DB_PASSWORD"]));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = COMPLETE.to_vec();
        pairs[4] = ("DB_PORT", "not-a-port");

        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DB_PORT", .. }));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = COMPLETE.to_vec();
        pairs.extend([("PORT", "8080"), ("MAX_PAGE_SIZE", "25"), ("HOST", "127.0.0.1")]);

        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_page_size, 25);
        assert_eq!(config.host, "127.0.0.1");
    }
}
