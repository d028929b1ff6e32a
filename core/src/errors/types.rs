//! Domain-specific error types for authentication and session operations
//!
//! Error codes and HTTP statuses are assigned in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Wrong credentials")]
    InvalidCredentials,

    #[error("Account is not verified")]
    AccountNotVerified,
}

/// Token-related errors
///
/// Covers both signed session tokens and opaque one-time tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, unparseable input or wrong token purpose
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    /// One-time token unknown, expired or already consumed
    #[error("Token not found")]
    TokenNotFound,

    /// Valid signature but the subject claim is absent or unreadable
    #[error("Malformed token claims")]
    TokenMalformed,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },
}
