//! Authentication service module
//!
//! This module provides the account use cases:
//! - Registration with email verification
//! - Login, token refresh and logout
//! - Forgotten-password reset by email
//! - Password hashing and outbound mail seams

mod mail;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use mail::{EmailTemplate, Mailer, RecordingMailer, SentMail};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::AuthService;
