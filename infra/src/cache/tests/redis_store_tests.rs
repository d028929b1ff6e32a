//! Tests for the Redis-backed key-value store

use std::sync::Arc;
use std::time::Duration;

use lr_core::repositories::KeyValueStore;
use lr_core::services::session::{OneTimeTokenPolicy, SessionConfig, SessionService};
use lr_shared::config::CacheConfig;
use uuid::Uuid;

use crate::cache::redis_store::{ttl_seconds, RedisKeyValueStore};
use crate::cache::RedisClient;

#[test]
fn test_ttl_rounds_up_to_whole_seconds() {
    assert_eq!(ttl_seconds(Duration::from_secs(900)), 900);
    assert_eq!(ttl_seconds(Duration::from_millis(1500)), 2);
    assert_eq!(ttl_seconds(Duration::from_millis(10)), 1);
    assert_eq!(ttl_seconds(Duration::ZERO), 1);
}

async fn store() -> RedisKeyValueStore {
    let config = CacheConfig::new(
        std::env::var("REDIS_DSN").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    RedisKeyValueStore::new(RedisClient::new(config).await.unwrap())
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_take_is_single_shot() {
    let store = store().await;
    let key = format!("light-room-test-{}", Uuid::new_v4());

    store.set(&key, "v", Duration::from_secs(30)).await.unwrap();
    assert_eq!(store.take(&key).await.unwrap(), Some("v".to_string()));
    assert_eq!(store.take(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_session_revocation_round_trip() {
    let store = Arc::new(store().await);
    let session = SessionService::new(
        store.clone(),
        SessionConfig::new("redis-test-secret").with_policy(OneTimeTokenPolicy::SingleUse),
    )
    .unwrap();

    let refresh_token = session.issue_refresh_token(Uuid::new_v4()).unwrap();
    session.revoke(&refresh_token).await.unwrap();
    assert!(session.is_revoked(&refresh_token).await.unwrap());

    let ttl = store
        .client()
        .ttl(&format!("light-room-token-{}", refresh_token))
        .await
        .unwrap()
        .unwrap();
    assert!(ttl > 47 * 60 * 60);
}
