pub mod auth;
pub mod files;

pub use lr_shared::ErrorResponse;
