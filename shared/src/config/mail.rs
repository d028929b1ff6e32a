//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::{required, ConfigError};

/// SMTP relay settings used for verification and password reset mail
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// RFC 5322 "From" address
    pub from: String,
}

impl MailConfig {
    /// Create from `MAIL_HOST`, `MAIL_PORT`, `MAIL_USERNAME`, `MAIL_PASSWORD`, `MAIL_FROM`
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = required("MAIL_PORT")?;
        let port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Invalid { name: "MAIL_PORT", reason: e.to_string() }
        })?;

        Ok(Self {
            host: required("MAIL_HOST")?,
            port,
            username: required("MAIL_USERNAME")?,
            password: required("MAIL_PASSWORD")?,
            from: required("MAIL_FROM")?,
        })
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"****")
            .field("from", &self.from)
            .finish()
    }
}
