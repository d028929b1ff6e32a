//! User entity representing a registered Light Room account.

use serde::Serialize;
use uuid::Uuid;

/// User entity representing a registered user
///
/// The password hash is never serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier for the user
    #[serde(rename = "user_id")]
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login email, unique across users
    pub email: String,

    /// Bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been confirmed
    pub is_verified: bool,
}

impl User {
    /// Creates a new, unverified user
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            is_verified: false,
        }
    }

    /// Marks the user as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }
}
