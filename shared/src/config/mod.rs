//! Configuration module with one sub-module per external collaborator
//!
//! - `auth` - token signing secret and lifetimes
//! - `cache` - Redis connection for the revocation list and one-time tokens
//! - `database` - Postgres connection pool
//! - `environment` - deployment environment name
//! - `mail` - outbound SMTP
//! - `server` - HTTP bind address
//! - `storage` - Cloudflare R2 bucket
//!
//! Every variable the service needs to talk to a collaborator is required.
//! A missing one is reported as [`ConfigError::Missing`] so the binary can
//! refuse to start instead of failing on the first request.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Read a required, non-empty environment variable
pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Read an optional variable and parse it, falling back to `default` when unset
pub(crate) fn optional_parsed<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid { name, reason: e.to_string() }),
        _ => Ok(default),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment, also used as the object key prefix
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Postgres configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// SMTP configuration
    pub mail: MailConfig,

    /// Object storage configuration
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// The first missing or malformed variable aborts the load.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env()?,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            mail: MailConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}
