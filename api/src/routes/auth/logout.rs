use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::LogoutRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the access and refresh tokens named in the body.
/// Requires authentication via Bearer token in Authorization header.
///
/// ## Success (200 OK)
/// ```json
/// {}
/// ```
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<LogoutRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .logout(&request.access_token, &request.refresh_token)
        .await
    {
        Ok(()) => {
            tracing::info!(user_id = %auth.user_id, "User logged out");
            HttpResponse::Ok().json(serde_json::json!({}))
        }
        Err(error) => handle_domain_error(error),
    }
}
