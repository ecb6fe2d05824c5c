//! Type-safe service configuration loaded from the environment.
//!
//! `VAULT_URL` is required; the service refuses to start without a vault
//! endpoint. `CONFIG_STORE_URL` is optional and controls whether the
//! remote key/value source is wired into the startup bootstrap.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use vault_client::VaultConfig;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("invalid URL for {field}: {reason}")]
    InvalidUrl { field: String, reason: String },

    /// Invalid port number
    #[error("invalid port: must be between 1 and 65535")]
    InvalidPort,

    /// Missing required field
    #[error("missing required configuration: {0}")]
    MissingRequired(String),

    /// Environment variable parse error
    #[error("failed to parse environment variable {name}: {reason}")]
    ParseError { name: String, reason: String },
}

/// Service configuration with validation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port (1-65535)
    pub port: u16,
    /// Vault endpoint URL
    pub vault_url: Url,
    /// Remote key/value configuration store URL; source skipped when unset
    pub config_store_url: Option<Url>,
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,
    /// Vault enumeration page size
    pub vault_page_size: usize,
    /// Emit JSON-formatted logs
    pub log_json: bool,
}

impl Config {
    /// Loads configuration from environment variables with validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8080)?,
            vault_url: require_url_env("VAULT_URL")?,
            config_store_url: optional_url_env("CONFIG_STORE_URL")?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT", 30)?,
            vault_page_size: parse_env("VAULT_PAGE_SIZE", 25)?,
            log_json: env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                name: "REQUEST_TIMEOUT".to_string(),
                reason: "timeout must be greater than 0".to_string(),
            });
        }
        if self.vault_page_size == 0 {
            return Err(ConfigError::ParseError {
                name: "VAULT_PAGE_SIZE".to_string(),
                reason: "page size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Bind address for the HTTP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Vault client configuration derived from this config.
    #[must_use]
    pub fn vault_config(&self) -> VaultConfig {
        VaultConfig::new(self.vault_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_page_size(self.vault_page_size)
    }
}

/// Parse an environment variable with a default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a required URL environment variable.
fn require_url_env(name: &str) -> Result<Url, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::MissingRequired(name.to_string()))?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an optional URL environment variable; unset or blank means absent.
fn optional_url_env(name: &str) -> Result<Option<Url>, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Url::parse(&value)
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl {
                field: name.to_string(),
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}
