//! Main session service implementation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{
    revocation_key, Claims, OneTimeTokenKind, TokenPair, TokenPurpose,
};
use crate::errors::{DomainError, TokenError, ValidationError};
use crate::repositories::KeyValueStore;

use super::config::{OneTimeTokenPolicy, SessionConfig};

/// Service owning every token the server hands out
///
/// Signed tokens are stateless apart from the revocation list; one-time
/// tokens exist only as key-value entries mapping the token to a user id.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionService {
    /// Creates a new session service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store holding revocation entries and one-time tokens
    /// * `config` - Signing secret, lifetimes and one-time token policy
    ///
    /// # Returns
    ///
    /// A new `SessionService`, or `DomainError::Configuration` when the
    /// secret is empty or revocation entries would expire before the
    /// tokens they block
    pub fn new(store: Arc<dyn KeyValueStore>, config: SessionConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if config.revocation_ttl < config.refresh_token_ttl
            || config.revocation_ttl < config.access_token_ttl
        {
            return Err(DomainError::Configuration {
                message: "revocation TTL must cover the longest token lifetime".to_string(),
            });
        }
        if config.one_time_token_bytes == 0 {
            return Err(DomainError::Configuration {
                message: "one-time tokens need at least one random byte".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            store,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Issues an access token for `subject`
    pub fn issue_access_token(&self, subject: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new(subject, TokenPurpose::Access, self.config.access_token_ttl);
        self.encode_jwt(&claims)
    }

    /// Issues a refresh token for `subject`
    pub fn issue_refresh_token(&self, subject: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new(subject, TokenPurpose::Refresh, self.config.refresh_token_ttl);
        self.encode_jwt(&claims)
    }

    /// Issues the access and refresh token handed out at login
    pub fn issue_token_pair(&self, subject: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(subject)?;
        let refresh_token = self.issue_refresh_token(subject)?;
        debug!(user_id = %subject, "Issued token pair");
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// The refresh token itself is not rotated and stays usable until it
    /// expires or is revoked.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A fresh access token for the refresh token's subject
    /// * `Err(TokenRevoked)` - The token is on the revocation list
    /// * `Err(TokenInvalid)` - Bad signature, unparseable, or not a refresh token
    /// * `Err(TokenExpired)` - Signature valid but past expiry
    /// * `Err(TokenMalformed)` - Subject claim missing or not a user id
    pub async fn validate_and_refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        if refresh_token.is_empty() {
            return Err(TokenError::TokenInvalid.into());
        }

        if self.is_revoked(refresh_token).await? {
            warn!(token = %mask_token(refresh_token), "Refresh attempted with revoked token");
            return Err(TokenError::TokenRevoked.into());
        }

        let claims = self.decode(refresh_token)?;
        let subject = claims.subject()?;
        if claims.purpose != TokenPurpose::Refresh {
            debug!(purpose = %claims.purpose, "Refresh attempted with non-refresh token");
            return Err(TokenError::TokenInvalid.into());
        }

        self.issue_access_token(subject)
    }

    /// Verifies an access token presented to a protected route
    ///
    /// Any failure is terminal for the request.
    pub async fn authenticate(&self, access_token: &str) -> Result<Uuid, DomainError> {
        let claims = self.decode(access_token)?;
        if claims.purpose != TokenPurpose::Access {
            return Err(TokenError::TokenInvalid.into());
        }
        let subject = claims.subject()?;

        if self.is_revoked(access_token).await? {
            warn!(user_id = %subject, "Rejected revoked access token");
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(subject)
    }

    /// Puts `token` on the revocation list
    ///
    /// The token is not inspected; revoking twice has the same effect as once.
    pub async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        if token.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "token".to_string(),
            }
            .into());
        }

        self.store
            .set(&revocation_key(token), token, self.config.revocation_ttl)
            .await?;

        info!(token = %mask_token(token), "Token revoked");
        Ok(())
    }

    /// Whether `token` is on the revocation list
    pub async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.store.get(&revocation_key(token)).await?.is_some())
    }

    /// Issues an email-verification token for `subject`
    pub async fn issue_verification_token(&self, subject: Uuid) -> Result<String, DomainError> {
        self.issue_one_time_token(OneTimeTokenKind::Verification, subject)
            .await
    }

    /// Resolves an email-verification token to its user id
    pub async fn consume_verification_token(&self, token: &str) -> Result<Uuid, DomainError> {
        self.consume_one_time_token(OneTimeTokenKind::Verification, token)
            .await
    }

    /// Issues a password-reset token for `subject`
    pub async fn issue_reset_token(&self, subject: Uuid) -> Result<String, DomainError> {
        self.issue_one_time_token(OneTimeTokenKind::PasswordReset, subject)
            .await
    }

    /// Resolves a password-reset token to its user id
    pub async fn consume_reset_token(&self, token: &str) -> Result<Uuid, DomainError> {
        self.consume_one_time_token(OneTimeTokenKind::PasswordReset, token)
            .await
    }

    /// Verifies signature and expiry and decodes the claims
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        // An unreadable header fails before any signature check
        decode_header(token).map_err(|_| TokenError::TokenInvalid)?;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    // Signature checked out but the payload is not our claim set
                    ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                        TokenError::TokenMalformed
                    }
                    _ => TokenError::TokenInvalid,
                }
            })?;

        Ok(token_data.claims)
    }

    async fn issue_one_time_token(
        &self,
        kind: OneTimeTokenKind,
        subject: Uuid,
    ) -> Result<String, DomainError> {
        let token = self.generate_opaque_token();
        self.store
            .set(&kind.key(&token), &subject.to_string(), self.ttl_for(kind))
            .await?;

        debug!(user_id = %subject, kind = %kind, "Issued one-time token");
        Ok(token)
    }

    async fn consume_one_time_token(
        &self,
        kind: OneTimeTokenKind,
        token: &str,
    ) -> Result<Uuid, DomainError> {
        if token.is_empty() {
            return Err(TokenError::TokenNotFound.into());
        }

        let key = kind.key(token);
        let value = match self.config.one_time_token_policy {
            OneTimeTokenPolicy::Replayable => self.store.get(&key).await?,
            OneTimeTokenPolicy::SingleUse => self.store.take(&key).await?,
        };

        let value = value.ok_or_else(|| {
            debug!(kind = %kind, token = %mask_token(token), "Unknown or expired one-time token");
            TokenError::TokenNotFound
        })?;

        Uuid::parse_str(&value).map_err(|_| {
            warn!(kind = %kind, "One-time token entry does not hold a user id");
            TokenError::TokenMalformed.into()
        })
    }

    fn ttl_for(&self, kind: OneTimeTokenKind) -> Duration {
        match kind {
            OneTimeTokenKind::Verification => self.config.verification_token_ttl,
            OneTimeTokenKind::PasswordReset => self.config.reset_token_ttl,
        }
    }

    /// Random bytes rendered as unpadded URL-safe base64
    fn generate_opaque_token(&self) -> String {
        let mut bytes = vec![0u8; self.config.one_time_token_bytes];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

/// Leading characters of a token, safe to log
fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{}***", prefix)
}
