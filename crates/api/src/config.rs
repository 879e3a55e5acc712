use std::str::FromStr;

use axum::http::HeaderValue;
use sitedesk_core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A configuration value that is present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// An empty list disables cross-origin access.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Rows per page when a list request has no `limit`.
    pub default_page_size: i64,
    /// Upper bound for a requested `limit`.
    pub max_page_size: i64,
    /// Pool size for the Postgres connection pool.
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
            request_timeout_secs: 30,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            db_max_connections: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DEFAULT_PAGE_SIZE`    | `10`                       |
    /// | `MAX_PAGE_SIZE`        | `100`                      |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(raw) => parse_origins(&raw)?,
            Err(_) => defaults.cors_origins,
        };

        let default_page_size = env_or("DEFAULT_PAGE_SIZE", defaults.default_page_size)?;
        let max_page_size = env_or("MAX_PAGE_SIZE", defaults.max_page_size)?;
        if default_page_size < 1 || max_page_size < default_page_size {
            return Err(ConfigError::Invalid {
                name: "MAX_PAGE_SIZE",
                value: max_page_size.to_string(),
            });
        }

        Ok(Self {
            host,
            port: env_or("PORT", defaults.port)?,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            default_page_size,
            max_page_size,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
        })
    }
}

/// `DATABASE_URL`, which has no default.
pub fn database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))
}

fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated origin list, rejecting values that are not valid
/// header values.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://a.test ,, http://b.test").unwrap();
        let origins: Vec<&str> = origins.iter().map(|o| o.to_str().unwrap()).collect();
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn origin_with_control_character_is_rejected() {
        assert!(parse_origins("http://a.test\n").is_ok());
        assert_matches!(
            parse_origins("http://bad\u{7f}.test"),
            Err(ConfigError::Invalid { name: "CORS_ORIGINS", .. })
        );
    }

    #[test]
    fn defaults_use_core_page_sizes() {
        let config = ServerConfig::default();
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
    }
}
