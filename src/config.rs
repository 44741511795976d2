//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    cache_backends, DEFAULT_COUNT_CACHE_TTL_SECONDS, DEFAULT_COUNT_TIMEOUT_MS,
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_PAGE_SIZE, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MAX_PAGE_SIZE,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub pagination: PaginationConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT configuration for staff access to the admin
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Listing pagination and count estimation
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Cache backend for counts: `redis` or `memory`
    pub cache_backend: String,
    /// How long a computed count is trusted
    pub count_cache_ttl_seconds: u64,
    /// Statement timeout for filtered exact counts
    pub count_timeout_ms: u64,
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl PaginationConfig {
    pub fn count_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.count_cache_ttl_seconds)
    }

    pub fn count_timeout(&self) -> Duration {
        Duration::from_millis(self.count_timeout_ms)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            cache_backend: cache_backends::REDIS.to_string(),
            count_cache_ttl_seconds: DEFAULT_COUNT_CACHE_TTL_SECONDS,
            count_timeout_ms: DEFAULT_COUNT_TIMEOUT_MS,
            default_per_page: DEFAULT_PAGE_SIZE,
            max_per_page: MAX_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            pagination: PaginationConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl PaginationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cache_backend = env::var("COUNT_CACHE_BACKEND").unwrap_or(defaults.cache_backend);
        if !cache_backends::ALL.contains(&cache_backend.as_str()) {
            return Err(ConfigError::InvalidValue("COUNT_CACHE_BACKEND".to_string()));
        }

        let config = Self {
            cache_backend,
            count_cache_ttl_seconds: parse_or("COUNT_CACHE_TTL_SECONDS", defaults.count_cache_ttl_seconds)?,
            count_timeout_ms: parse_or("COUNT_TIMEOUT_MS", defaults.count_timeout_ms)?,
            default_per_page: parse_or("DEFAULT_PER_PAGE", defaults.default_per_page)?,
            max_per_page: parse_or("MAX_PER_PAGE", defaults.max_per_page)?,
        };

        if config.default_per_page == 0 || config.default_per_page > config.max_per_page {
            return Err(ConfigError::InvalidValue("DEFAULT_PER_PAGE".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.count_cache_ttl(), Duration::from_secs(3600));
        assert_eq!(pagination.count_timeout(), Duration::from_millis(2000));
        assert_eq!(pagination.cache_backend, "redis");
        assert!(pagination.default_per_page <= pagination.max_per_page);
    }

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        let value: u64 = parse_or("RANKBOARD_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
