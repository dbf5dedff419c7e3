//! Application configuration management
//!
//! Configuration is loaded from environment variables (and an optional
//! `.env` file) once at startup and validated before the server binds.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_ATTRIBUTE_CACHE_TTL_SECONDS, DEFAULT_CALCULATOR_URL, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_OSU_API_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub osu_api: OsuApiConfig,
    pub calculator: CalculatorConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Shared-secret authentication for internal callers
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub internal_key: String,
}

/// Score database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Attribute cache configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub attribute_ttl_seconds: u64,
}

/// osu! API configuration
#[derive(Debug, Clone)]
pub struct OsuApiConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Remote calculation engine configuration
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    pub url: String,
    /// Timeout applied to every outbound HTTP call
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            security: SecurityConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            osu_api: OsuApiConfig::from_env()?,
            calculator: CalculatorConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SecurityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let internal_key = required("INTERNAL_KEY")?;
        if internal_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue("INTERNAL_KEY".to_string()));
        }

        Ok(Self { internal_key })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required("DATABASE_URL")?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            attribute_ttl_seconds: parse_or(
                "ATTRIBUTE_CACHE_TTL_SECONDS",
                DEFAULT_ATTRIBUTE_CACHE_TTL_SECONDS,
            )?,
        })
    }
}

impl OsuApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: required("OSU_API_KEY")?,
            base_url: env::var("OSU_API_URL").unwrap_or_else(|_| DEFAULT_OSU_API_URL.to_string()),
        })
    }
}

impl CalculatorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("CALCULATOR_URL").unwrap_or_else(|_| DEFAULT_CALCULATOR_URL.to_string()),
            timeout_seconds: parse_or("HTTP_TIMEOUT_SECONDS", DEFAULT_HTTP_TIMEOUT_SECONDS)?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
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
