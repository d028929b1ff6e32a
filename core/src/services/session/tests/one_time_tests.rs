//! Tests for email-verification and password-reset tokens

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use uuid::Uuid;

use super::{service, service_with_policy};
use crate::errors::{DomainError, TokenError};
use crate::repositories::KeyValueStore;
use crate::services::session::OneTimeTokenPolicy;

fn token_error(result: Result<Uuid, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_verification_token_round_trip() {
    let (service, _, _) = service();
    let user_id = Uuid::new_v4();

    let token = service.issue_verification_token(user_id).await.unwrap();
    assert_eq!(service.consume_verification_token(&token).await.unwrap(), user_id);
}

#[tokio::test]
async fn test_one_time_token_shape() {
    let (service, _, _) = service();
    let token = service.issue_reset_token(Uuid::new_v4()).await.unwrap();

    assert!(!token.contains('='));
    assert_eq!(URL_SAFE_NO_PAD.decode(&token).unwrap().len(), 16);

    let other = service.issue_reset_token(Uuid::new_v4()).await.unwrap();
    assert_ne!(token, other);
}

#[tokio::test]
async fn test_one_time_entries_use_prefixed_keys() {
    let (service, store, _) = service();
    let user_id = Uuid::new_v4();

    let verification = service.issue_verification_token(user_id).await.unwrap();
    let reset = service.issue_reset_token(user_id).await.unwrap();

    let verification_key = format!("light-room-user-verification-{}", verification);
    let reset_key = format!("light-room-password-reset-{}", reset);
    assert_eq!(
        store.get(&verification_key).await.unwrap(),
        Some(user_id.to_string())
    );
    assert_eq!(store.get(&reset_key).await.unwrap(), Some(user_id.to_string()));
    assert_eq!(store.ttl(&verification_key), Some(Duration::hours(24)));
    assert_eq!(store.ttl(&reset_key), Some(Duration::minutes(15)));
}

#[tokio::test]
async fn test_token_kinds_do_not_cross() {
    let (service, _, _) = service();
    let token = service.issue_verification_token(Uuid::new_v4()).await.unwrap();

    let err = token_error(service.consume_reset_token(&token).await);
    assert_eq!(err, TokenError::TokenNotFound);
}

#[tokio::test]
async fn test_unknown_reset_token_not_found() {
    let (service, _, _) = service();
    let err = token_error(service.consume_reset_token("never-issued").await);
    assert_eq!(err, TokenError::TokenNotFound);

    let err = token_error(service.consume_reset_token("").await);
    assert_eq!(err, TokenError::TokenNotFound);
}

#[tokio::test]
async fn test_reset_token_valid_just_before_expiry() {
    let (service, _, clock) = service();
    let user_id = Uuid::new_v4();
    let token = service.issue_reset_token(user_id).await.unwrap();

    clock.advance(Duration::minutes(14) + Duration::seconds(59));
    assert_eq!(service.consume_reset_token(&token).await.unwrap(), user_id);
}

#[tokio::test]
async fn test_reset_token_gone_just_after_expiry() {
    let (service, _, clock) = service();
    let token = service.issue_reset_token(Uuid::new_v4()).await.unwrap();

    clock.advance(Duration::minutes(15) + Duration::seconds(1));
    let err = token_error(service.consume_reset_token(&token).await);
    assert_eq!(err, TokenError::TokenNotFound);
}

#[tokio::test]
async fn test_verification_token_expires_after_a_day() {
    let (service, _, clock) = service();
    let token = service.issue_verification_token(Uuid::new_v4()).await.unwrap();

    clock.advance(Duration::hours(23));
    assert!(service.consume_verification_token(&token).await.is_ok());

    clock.advance(Duration::hours(1));
    let err = token_error(service.consume_verification_token(&token).await);
    assert_eq!(err, TokenError::TokenNotFound);
}

#[tokio::test]
async fn test_replayable_policy_allows_second_consume() {
    let (service, _, _) = service();
    let user_id = Uuid::new_v4();
    let token = service.issue_verification_token(user_id).await.unwrap();

    assert_eq!(service.consume_verification_token(&token).await.unwrap(), user_id);
    assert_eq!(service.consume_verification_token(&token).await.unwrap(), user_id);
}

#[tokio::test]
async fn test_single_use_policy_rejects_second_consume() {
    let (service, store, _) = service_with_policy(OneTimeTokenPolicy::SingleUse);
    let user_id = Uuid::new_v4();
    let token = service.issue_reset_token(user_id).await.unwrap();

    assert_eq!(service.consume_reset_token(&token).await.unwrap(), user_id);
    let err = token_error(service.consume_reset_token(&token).await);
    assert_eq!(err, TokenError::TokenNotFound);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_entry_without_user_id_is_malformed() {
    let (service, store, _) = service();
    store
        .set(
            "light-room-user-verification-corrupt",
            "not-a-uuid",
            std::time::Duration::from_secs(60),
        )
        .await
        .unwrap();

    let err = token_error(service.consume_verification_token("corrupt").await);
    assert_eq!(err, TokenError::TokenMalformed);
}

#[tokio::test]
async fn test_issuance_fails_when_store_is_down() {
    let (service, store, _) = service();
    store.set_unavailable(true);

    let result = service.issue_verification_token(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
}

#[tokio::test]
async fn test_failed_consume_leaves_entry_intact() {
    let (service, store, _) = service_with_policy(OneTimeTokenPolicy::SingleUse);
    let user_id = Uuid::new_v4();
    let token = service.issue_reset_token(user_id).await.unwrap();

    store.set_unavailable(true);
    assert!(service.consume_reset_token(&token).await.is_err());

    store.set_unavailable(false);
    assert_eq!(service.consume_reset_token(&token).await.unwrap(), user_id);
}
