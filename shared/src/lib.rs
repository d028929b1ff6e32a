//! Shared configuration and response types for the Light Room server
//!
//! This crate provides the pieces every other crate depends on:
//! - Configuration loaded from the process environment
//! - The JSON error body returned by all API endpoints

pub mod config;
pub mod errors;

pub use config::{
    AppConfig, ConfigError, Environment,
    CacheConfig, DatabaseConfig, JwtConfig, MailConfig, ServerConfig, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
