//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DRAFT_DEADLINE_HOURS, DEFAULT_FINALIZE_CRON,
    DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_MAX_COMMIT_RETRIES, DEFAULT_NOTIFICATION_QUEUE_CAPACITY,
    DEFAULT_PICKS_PER_MEMBER, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MAX_PICKS_PER_MEMBER,
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
    pub draft: DraftConfig,
    pub notifications: NotificationConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// `pretty` or `json`
    pub log_format: String,
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

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Draft engine configuration
#[derive(Debug, Clone)]
pub struct DraftConfig {
    /// Quota given to newly created leagues
    pub picks_per_member: u32,
    pub default_deadline_hours: i64,
    /// Commit attempts before a contended pick is reported as a conflict
    pub max_commit_retries: u32,
    pub finalize_cron: String,
    pub finalize_enabled: bool,
}

/// Notification channel configuration
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub queue_capacity: usize,
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
            draft: DraftConfig::from_env()?,
            notifications: NotificationConfig::from_env()?,
        })
    }
}

/// Read an optional variable and parse it, falling back to `default`
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
        if log_format != "pretty" && log_format != "json" {
            return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string()));
        }

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
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
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
        })
    }
}

impl DraftConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            picks_per_member: parse_var("DRAFT_PICKS_PER_MEMBER", DEFAULT_PICKS_PER_MEMBER)?,
            default_deadline_hours: parse_var(
                "DRAFT_DEFAULT_DEADLINE_HOURS",
                DEFAULT_DRAFT_DEADLINE_HOURS,
            )?,
            max_commit_retries: parse_var("DRAFT_MAX_COMMIT_RETRIES", DEFAULT_MAX_COMMIT_RETRIES)?,
            finalize_cron: env::var("DRAFT_FINALIZE_CRON")
                .unwrap_or_else(|_| DEFAULT_FINALIZE_CRON.to_string()),
            finalize_enabled: parse_var("DRAFT_FINALIZE_ENABLED", true)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.picks_per_member == 0 || self.picks_per_member > MAX_PICKS_PER_MEMBER {
            return Err(ConfigError::InvalidValue("DRAFT_PICKS_PER_MEMBER".to_string()));
        }
        if self.default_deadline_hours <= 0 {
            return Err(ConfigError::InvalidValue(
                "DRAFT_DEFAULT_DEADLINE_HOURS".to_string(),
            ));
        }
        if self.max_commit_retries == 0 {
            return Err(ConfigError::InvalidValue("DRAFT_MAX_COMMIT_RETRIES".to_string()));
        }
        Ok(())
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            picks_per_member: DEFAULT_PICKS_PER_MEMBER,
            default_deadline_hours: DEFAULT_DRAFT_DEADLINE_HOURS,
            max_commit_retries: DEFAULT_MAX_COMMIT_RETRIES,
            finalize_cron: DEFAULT_FINALIZE_CRON.to_string(),
            finalize_enabled: true,
        }
    }
}

impl NotificationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let queue_capacity =
            parse_var("NOTIFICATION_QUEUE_CAPACITY", DEFAULT_NOTIFICATION_QUEUE_CAPACITY)?;
        if queue_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "NOTIFICATION_QUEUE_CAPACITY".to_string(),
            ));
        }
        Ok(Self { queue_capacity })
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
            log_format: "pretty".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        let draft = DraftConfig::default();
        assert_eq!(draft.picks_per_member, 2);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_config_rejects_zero_quota() {
        let draft = DraftConfig {
            picks_per_member: 0,
            ..DraftConfig::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(ConfigError::InvalidValue(name)) if name == "DRAFT_PICKS_PER_MEMBER"
        ));
    }

    #[test]
    fn test_draft_config_rejects_zero_retries() {
        let draft = DraftConfig {
            max_commit_retries: 0,
            ..DraftConfig::default()
        };
        assert!(draft.validate().is_err());
    }
}
