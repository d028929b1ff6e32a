//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Light Room
//! backend. It provides the concrete implementations of the interfaces
//! defined in `lr_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: Postgres user repository using SQLx
//! - **Cache**: Redis client and the key-value store behind sessions
//! - **Mail**: SMTP delivery through lettre
//! - **Storage**: Cloudflare R2 through the S3 SDK

use lr_core::errors::DomainError;

/// Database module - Postgres implementations using SQLx
pub mod database;

/// Cache module - Redis client and key-value store
pub mod cache;

/// Mail module - SMTP mailer
pub mod mail;

/// Storage module - S3-compatible object storage
pub mod storage;

/// Configuration types consumed by this crate
pub mod config {
    pub use lr_shared::config::{CacheConfig, DatabaseConfig, MailConfig, StorageConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        let message = err.to_string();
        match err {
            InfrastructureError::Cache(_) => DomainError::StoreUnavailable { message },
            InfrastructureError::Mail(_) => DomainError::Mail { message },
            InfrastructureError::Storage(_) => DomainError::Storage { message },
            InfrastructureError::Config(_) => DomainError::Configuration { message },
            InfrastructureError::Database(_) | InfrastructureError::Migration(_) => {
                DomainError::Internal { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_errors_map_to_store_unavailable() {
        let err = InfrastructureError::Cache(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        )));
        assert!(matches!(
            DomainError::from(err),
            DomainError::StoreUnavailable { .. }
        ));
    }

    #[test]
    fn test_mail_and_storage_errors_keep_their_kind() {
        let mail: DomainError = InfrastructureError::Mail("relay down".to_string()).into();
        assert!(
            matches!(mail, DomainError::Mail { ref message } if message.contains("relay down"))
        );

        let storage: DomainError = InfrastructureError::Storage("403".to_string()).into();
        assert!(matches!(storage, DomainError::Storage { .. }));
    }
}
