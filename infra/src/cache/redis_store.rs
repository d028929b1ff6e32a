//! Redis-backed `KeyValueStore`

use async_trait::async_trait;
use std::time::Duration;

use lr_core::errors::DomainError;
use lr_core::repositories::KeyValueStore;

use super::redis_client::RedisClient;

/// Session store on top of [`RedisClient`]
///
/// Expiry is delegated to Redis; sub-second TTLs are rounded up to one
/// second because `SETEX` only takes whole seconds.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: RedisClient,
}

impl RedisKeyValueStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

pub(crate) fn ttl_seconds(ttl: Duration) -> u64 {
    let seconds = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        seconds + 1
    } else {
        seconds.max(1)
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        Ok(self
            .client
            .set_with_expiry(key, value, ttl_seconds(ttl))
            .await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(key).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.delete(key).await?)
    }

    async fn take(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get_del(key).await?)
    }
}
