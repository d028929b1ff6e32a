use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "account_verified": true
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid body or account not verified
/// - 404 Not Found: Wrong credentials
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(pair) => HttpResponse::Ok().json(LoginResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            account_verified: true,
        }),
        Err(error) => handle_domain_error(error),
    }
}
