pub mod auth;
pub mod timing;

pub use auth::{AuthContext, JwtAuth};
pub use timing::RequestTiming;
