//! Token signing configuration

use serde::{Deserialize, Serialize};

use super::{optional_parsed, required, ConfigError};

/// Access token lifetime (24 hours)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Refresh token lifetime (48 hours)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 48 * 60 * 60;

/// Default bcrypt work factor for stored passwords
pub const DEFAULT_BCRYPT_COST: u32 = 14;

/// JWT and credential configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify session tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// bcrypt cost used when hashing passwords
    pub bcrypt_cost: u32,

    /// Delete one-time tokens when they are consumed
    #[serde(default)]
    pub single_use_tokens: bool,
}

impl JwtConfig {
    /// Create a configuration with the given secret and default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY_SECONDS,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY_SECONDS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            single_use_tokens: false,
        }
    }

    /// Create from environment variables
    ///
    /// `JWT_SECRET` is required. `BCRYPT_COST` and
    /// `ONE_TIME_TOKENS_SINGLE_USE` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(required("JWT_SECRET")?);
        config.bcrypt_cost = optional_parsed("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        config.single_use_tokens = optional_parsed("ONE_TIME_TOKENS_SINGLE_USE", false)?;
        Ok(config)
    }
}

// The secret never reaches logs through `{:?}`.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"****")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("single_use_tokens", &self.single_use_tokens)
            .finish()
    }
}
