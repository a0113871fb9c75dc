//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use catalog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server against the in-memory repository.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let database = var("DATABASE_URL").map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse(var("DB_MAX_CONNECTIONS"))
                    .unwrap_or(defaults.max_connections),
                min_connections: parse(var("DB_MIN_CONNECTIONS"))
                    .unwrap_or(defaults.min_connections),
                connect_timeout: parse(var("DB_CONNECT_TIMEOUT_SECS"))
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.connect_timeout),
                ..defaults
            }
        });

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse(var("PORT")).unwrap_or(8080),
            database,
        }
    }
}

fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}
