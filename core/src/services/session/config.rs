//! Configuration for the session service

use std::time::Duration;

use lr_shared::JwtConfig;

/// Access token lifetime (24 hours)
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Refresh token lifetime (48 hours)
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(48 * 60 * 60);

/// Revocation entries outlive every refresh token
pub const REVOCATION_TTL: Duration = Duration::from_secs(48 * 60 * 60);

/// Email-verification token lifetime (24 hours)
pub const VERIFICATION_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Password-reset token lifetime (15 minutes)
pub const RESET_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Random bytes per one-time token
pub const ONE_TIME_TOKEN_BYTES: usize = 16;

/// What happens to a one-time token once it has been consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OneTimeTokenPolicy {
    /// Entry stays until its TTL lapses; the token can be replayed meanwhile
    #[default]
    Replayable,
    /// Entry is read and deleted atomically on first use
    SingleUse,
}

/// Configuration for the session service
#[derive(Clone)]
pub struct SessionConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub revocation_ttl: Duration,
    pub verification_token_ttl: Duration,
    pub reset_token_ttl: Duration,
    pub one_time_token_bytes: usize,
    pub one_time_token_policy: OneTimeTokenPolicy,
}

impl SessionConfig {
    /// Default lifetimes with the given signing secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl: ACCESS_TOKEN_TTL,
            refresh_token_ttl: REFRESH_TOKEN_TTL,
            revocation_ttl: REVOCATION_TTL,
            verification_token_ttl: VERIFICATION_TOKEN_TTL,
            reset_token_ttl: RESET_TOKEN_TTL,
            one_time_token_bytes: ONE_TIME_TOKEN_BYTES,
            one_time_token_policy: OneTimeTokenPolicy::Replayable,
        }
    }

    pub fn with_policy(mut self, policy: OneTimeTokenPolicy) -> Self {
        self.one_time_token_policy = policy;
        self
    }
}

impl From<&JwtConfig> for SessionConfig {
    fn from(jwt: &JwtConfig) -> Self {
        let policy = if jwt.single_use_tokens {
            OneTimeTokenPolicy::SingleUse
        } else {
            OneTimeTokenPolicy::Replayable
        };

        let mut config = Self::new(jwt.secret.clone()).with_policy(policy);
        config.access_token_ttl = Duration::from_secs(jwt.access_token_expiry.max(0) as u64);
        config.refresh_token_ttl = Duration::from_secs(jwt.refresh_token_expiry.max(0) as u64);
        config.revocation_ttl = config.revocation_ttl.max(config.refresh_token_ttl);
        config
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("jwt_secret", &"****")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("revocation_ttl", &self.revocation_ttl)
            .field("verification_token_ttl", &self.verification_token_ttl)
            .field("reset_token_ttl", &self.reset_token_ttl)
            .field("one_time_token_bytes", &self.one_time_token_bytes)
            .field("one_time_token_policy", &self.one_time_token_policy)
            .finish()
    }
}
