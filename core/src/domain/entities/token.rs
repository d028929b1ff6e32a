//! Token entities for signed session tokens and one-time tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::TokenError;

/// Key prefix of revocation (blacklist) entries
pub const REVOCATION_KEY_PREFIX: &str = "light-room-token-";

/// Key prefix of email-verification entries
pub const VERIFICATION_KEY_PREFIX: &str = "light-room-user-verification-";

/// Key prefix of password-reset entries
pub const PASSWORD_RESET_KEY_PREFIX: &str = "light-room-password-reset-";

/// What a signed session token may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Access,
    Refresh,
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPurpose::Access => write!(f, "access"),
            TokenPurpose::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Access or refresh
    pub purpose: TokenPurpose,

    /// JWT ID, unique per minted token
    pub jti: String,
}

impl Claims {
    /// Creates claims for `subject` expiring `lifetime` from now
    ///
    /// # Arguments
    ///
    /// * `subject` - The user's UUID
    /// * `purpose` - Access or refresh
    /// * `lifetime` - Time until expiry
    pub fn new(subject: Uuid, purpose: TokenPurpose, lifetime: Duration) -> Self {
        let now = Utc::now().timestamp();
        let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);

        Self {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(lifetime),
            purpose,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parses the subject claim into a user id
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::TokenMalformed)
    }
}

/// Access and refresh token issued together at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

/// Kinds of opaque one-time tokens backed by the key-value store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneTimeTokenKind {
    /// Email verification, 24 hours by default
    Verification,
    /// Password reset, 15 minutes by default
    PasswordReset,
}

impl OneTimeTokenKind {
    /// Store key prefix for this kind
    pub fn key_prefix(&self) -> &'static str {
        match self {
            OneTimeTokenKind::Verification => VERIFICATION_KEY_PREFIX,
            OneTimeTokenKind::PasswordReset => PASSWORD_RESET_KEY_PREFIX,
        }
    }

    /// Full store key for `token`
    pub fn key(&self, token: &str) -> String {
        format!("{}{}", self.key_prefix(), token)
    }
}

impl fmt::Display for OneTimeTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OneTimeTokenKind::Verification => write!(f, "verification"),
            OneTimeTokenKind::PasswordReset => write!(f, "password reset"),
        }
    }
}

/// Store key of the revocation entry for `token`
pub fn revocation_key(token: &str) -> String {
    format!("{}{}", REVOCATION_KEY_PREFIX, token)
}
