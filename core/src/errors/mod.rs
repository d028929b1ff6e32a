//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Key-value store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Object storage error: {message}")]
    Storage { message: String },

    #[error("Mail delivery failed: {message}")]
    Mail { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Returns the token error wrapped by this error, if any
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }

    /// True for failures of a backing service rather than of the request
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable { .. }
                | DomainError::Storage { .. }
                | DomainError::Mail { .. }
                | DomainError::Configuration { .. }
                | DomainError::Internal { .. }
        )
    }
}
