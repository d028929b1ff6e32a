//! Session manager: signed session tokens, the revocation list and
//! one-time tokens
//!
//! - Access and refresh JWT issuance and verification (HS256)
//! - Refresh-token exchange for a new access token
//! - Logout revocation entries kept for longer than any token can live
//! - Email-verification and password-reset tokens backed by the key-value store

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::{OneTimeTokenPolicy, SessionConfig};
pub use service::SessionService;
