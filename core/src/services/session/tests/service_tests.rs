//! Tests for signed session tokens and the revocation list

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use super::{service, SECRET};
use crate::domain::entities::token::{Claims, TokenPurpose};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryKeyValueStore, KeyValueStore};
use crate::services::session::{SessionConfig, SessionService};

fn sign(payload: &serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_empty_secret_is_rejected() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let result = SessionService::new(store, SessionConfig::new("  "));
    assert!(matches!(result, Err(DomainError::Configuration { .. })));
}

#[test]
fn test_revocation_ttl_must_cover_refresh_lifetime() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut config = SessionConfig::new(SECRET);
    config.revocation_ttl = Duration::from_secs(60);
    let result = SessionService::new(store, config);
    assert!(matches!(result, Err(DomainError::Configuration { .. })));
}

#[test]
fn test_issued_tokens_carry_purpose_and_subject() {
    let (service, _, _) = service();
    let user_id = Uuid::new_v4();

    let pair = service.issue_token_pair(user_id).unwrap();
    assert_ne!(pair.access_token, pair.refresh_token);

    let access = service.decode(&pair.access_token).unwrap();
    assert_eq!(access.purpose, TokenPurpose::Access);
    assert_eq!(access.subject().unwrap(), user_id);
    assert_eq!(access.exp - access.iat, 24 * 60 * 60);

    let refresh = service.decode(&pair.refresh_token).unwrap();
    assert_eq!(refresh.purpose, TokenPurpose::Refresh);
    assert_eq!(refresh.exp - refresh.iat, 48 * 60 * 60);
}

#[tokio::test]
async fn test_refresh_returns_access_token_for_same_subject() {
    let (service, _, _) = service();
    let user_id = Uuid::new_v4();
    let refresh_token = service.issue_refresh_token(user_id).unwrap();

    let access_token = service.validate_and_refresh(&refresh_token).await.unwrap();

    let claims = service.decode(&access_token).unwrap();
    assert_eq!(claims.subject().unwrap(), user_id);
    assert_eq!(claims.purpose, TokenPurpose::Access);
    assert_eq!(service.authenticate(&access_token).await.unwrap(), user_id);
}

#[tokio::test]
async fn test_refresh_does_not_rotate_refresh_token() {
    let (service, _, _) = service();
    let refresh_token = service.issue_refresh_token(Uuid::new_v4()).unwrap();

    service.validate_and_refresh(&refresh_token).await.unwrap();
    assert!(service.validate_and_refresh(&refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revoked_refresh_token_is_rejected() {
    let (service, _, _) = service();
    let refresh_token = service.issue_refresh_token(Uuid::new_v4()).unwrap();

    service.revoke(&refresh_token).await.unwrap();

    assert!(service.is_revoked(&refresh_token).await.unwrap());
    let err = token_error(service.validate_and_refresh(&refresh_token).await);
    assert_eq!(err, TokenError::TokenRevoked);
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let (service, store, _) = service();
    let token = service.issue_access_token(Uuid::new_v4()).unwrap();

    service.revoke(&token).await.unwrap();
    service.revoke(&token).await.unwrap();

    assert_eq!(store.len(), 1);
    assert!(service.is_revoked(&token).await.unwrap());
}

#[tokio::test]
async fn test_revocation_entry_layout() {
    let (service, store, _) = service();
    let token = service.issue_access_token(Uuid::new_v4()).unwrap();

    service.revoke(&token).await.unwrap();

    let key = format!("light-room-token-{}", token);
    assert_eq!(store.get(&key).await.unwrap(), Some(token));
    assert_eq!(store.ttl(&key), Some(chrono::Duration::hours(48)));
}

#[tokio::test]
async fn test_revoke_accepts_arbitrary_strings() {
    let (service, _, _) = service();
    service.revoke("not-even-a-jwt").await.unwrap();
    assert!(service.is_revoked("not-even-a-jwt").await.unwrap());
    assert!(!service.is_revoked("something-else").await.unwrap());
}

#[tokio::test]
async fn test_revoke_empty_token_is_validation_error() {
    let (service, store, _) = service();
    let result = service.revoke("").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let (service, _, _) = service();
    let access_token = service.issue_access_token(Uuid::new_v4()).unwrap();

    let err = token_error(service.validate_and_refresh(&access_token).await);
    assert_eq!(err, TokenError::TokenInvalid);
}

#[tokio::test]
async fn test_refresh_token_cannot_authenticate() {
    let (service, _, _) = service();
    let refresh_token = service.issue_refresh_token(Uuid::new_v4()).unwrap();

    let err = token_error(service.authenticate(&refresh_token).await);
    assert_eq!(err, TokenError::TokenInvalid);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_invalid() {
    let (service, _, _) = service();
    let claims = Claims::new(Uuid::new_v4(), TokenPurpose::Refresh, Duration::from_secs(600));
    let forged = sign(&serde_json::to_value(&claims).unwrap(), "another-secret");

    let err = token_error(service.validate_and_refresh(&forged).await);
    assert_eq!(err, TokenError::TokenInvalid);
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let (service, _, _) = service();
    let err = token_error(service.validate_and_refresh("abc.def.ghi").await);
    assert_eq!(err, TokenError::TokenInvalid);

    let err = token_error(service.validate_and_refresh("").await);
    assert_eq!(err, TokenError::TokenInvalid);
}

#[tokio::test]
async fn test_unparseable_header_is_invalid_not_malformed() {
    let (service, _, _) = service();
    for token in ["abc.def.ghi", "not-a-jwt-at-all.x.y", "e30.e30.sig"] {
        let err = token_error(service.validate_and_refresh(token).await);
        assert_eq!(err, TokenError::TokenInvalid, "refresh with {token}");

        let err = token_error(service.authenticate(token).await);
        assert_eq!(err, TokenError::TokenInvalid, "authenticate with {token}");
    }
}

#[tokio::test]
async fn test_expired_token_is_reported_as_expired() {
    let (service, _, _) = service();
    let now = Utc::now().timestamp();
    let expired = sign(
        &json!({
            "sub": Uuid::new_v4().to_string(),
            "iat": now - 7200,
            "exp": now - 3600,
            "purpose": "refresh",
            "jti": Uuid::new_v4().to_string(),
        }),
        SECRET,
    );

    let err = token_error(service.validate_and_refresh(&expired).await);
    assert_eq!(err, TokenError::TokenExpired);

    let err = token_error(service.authenticate(&expired).await);
    assert_eq!(err, TokenError::TokenExpired);
}

#[tokio::test]
async fn test_subject_that_is_not_a_user_id_is_malformed() {
    let (service, _, _) = service();
    let now = Utc::now().timestamp();
    let token = sign(
        &json!({
            "sub": "42",
            "iat": now,
            "exp": now + 600,
            "purpose": "refresh",
            "jti": Uuid::new_v4().to_string(),
        }),
        SECRET,
    );

    let err = token_error(service.validate_and_refresh(&token).await);
    assert_eq!(err, TokenError::TokenMalformed);
}

#[tokio::test]
async fn test_missing_subject_is_malformed() {
    let (service, _, _) = service();
    let now = Utc::now().timestamp();
    let token = sign(
        &json!({
            "user_id": Uuid::new_v4().to_string(),
            "exp": now + 600,
        }),
        SECRET,
    );

    let err = token_error(service.validate_and_refresh(&token).await);
    assert_eq!(err, TokenError::TokenMalformed);
}

#[tokio::test]
async fn test_revoked_access_token_fails_authentication() {
    let (service, _, _) = service();
    let user_id = Uuid::new_v4();
    let access_token = service.issue_access_token(user_id).unwrap();
    assert_eq!(service.authenticate(&access_token).await.unwrap(), user_id);

    service.revoke(&access_token).await.unwrap();

    let err = token_error(service.authenticate(&access_token).await);
    assert_eq!(err, TokenError::TokenRevoked);
}

#[tokio::test]
async fn test_store_outage_surfaces_as_unavailable() {
    let (service, store, _) = service();
    let refresh_token = service.issue_refresh_token(Uuid::new_v4()).unwrap();
    store.set_unavailable(true);

    assert!(matches!(
        service.validate_and_refresh(&refresh_token).await,
        Err(DomainError::StoreUnavailable { .. })
    ));
    assert!(matches!(
        service.revoke(&refresh_token).await,
        Err(DomainError::StoreUnavailable { .. })
    ));
}
