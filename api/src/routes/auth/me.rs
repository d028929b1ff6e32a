use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the account behind the bearer token.
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.auth_service.me(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}
