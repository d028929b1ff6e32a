//! Authentication route handlers
//!
//! This module contains all account and session endpoints:
//! - Registration and email verification
//! - Login, token refresh and logout
//! - Password reset by email

pub mod login;
pub mod logout;
pub mod me;
pub mod password;
pub mod refresh;
pub mod sign_up;
pub mod verify_account;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use password::{forgot_password, reset_password};
pub use refresh::refresh;
pub use sign_up::sign_up;
pub use verify_account::{resend_verification, verify_account};
