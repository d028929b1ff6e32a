//! Key-value store with per-entry expiry.
//!
//! Backs the revocation list and the one-time tokens. Every operation is
//! atomic for a single key; implementations report connectivity failures as
//! `DomainError::StoreUnavailable`.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous entry, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Read a live entry
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Entry present and not expired
    /// * `Ok(None)` - Entry absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Remove an entry, returning whether one was present
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Atomically read and remove an entry
    ///
    /// Of two concurrent calls on the same key at most one observes the value.
    async fn take(&self, key: &str) -> Result<Option<String>, DomainError>;
}
