//! Domain entities representing core business objects.

pub mod token;
pub mod user;

pub use token::{
    revocation_key, Claims, OneTimeTokenKind, TokenPair, TokenPurpose, PASSWORD_RESET_KEY_PREFIX,
    REVOCATION_KEY_PREFIX, VERIFICATION_KEY_PREFIX,
};
pub use user::User;
