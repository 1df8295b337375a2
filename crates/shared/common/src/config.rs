//! Shared configuration structures.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Secret used by debug builds when `JWT_SECRET` is not set.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Parse a raw setting, naming the variable when the value is malformed.
pub fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: format!("{:?}: {}", raw, e),
    })
}

/// Read and parse an optional environment variable. Unset yields `None`.
pub fn env_parse<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "gateway".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Document database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Database name
    pub name: String,
}

impl DatabaseConfig {
    /// Load from `MONGODB_URI` / `MONGODB_DATABASE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: env::var("MONGODB_URI").unwrap_or(defaults.uri),
            name: env::var("MONGODB_DATABASE").unwrap_or(defaults.name),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "messages".to_string(),
        }
    }
}

/// JWT configuration for authentication.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Load from `JWT_SECRET` / `JWT_EXPIRATION_HOURS`.
    ///
    /// Debug builds fall back to a development secret when `JWT_SECRET` is
    /// unset; release builds refuse to start without one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let expiration_hours =
            env_parse("JWT_EXPIRATION_HOURS")?.unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS);

        Self::new(secret, expiration_hours)
    }

    /// Build a validated JWT configuration.
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} characters long", MIN_JWT_SECRET_LENGTH),
            });
        }
        if expiration_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_HOURS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret,
            expiration_hours,
        })
    }
}
