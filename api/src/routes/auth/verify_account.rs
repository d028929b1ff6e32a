use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{EmailRequest, MessageResponse, StatusMessageResponse, TokenRequest};
use crate::handlers::error::{
    handle_domain_error, handle_domain_error_in, validation_error_response, ErrorContext,
};

/// Handler for POST /api/v1/auth/account-verification
///
/// Consumes a verification token and marks its account verified.
///
/// ## Success (200 OK)
/// ```json
/// { "message": "user account verified", "status": "ok" }
/// ```
///
/// ## Errors
/// - 404 Not Found: Token unknown or expired, or the account no longer exists
pub async fn verify_account(
    state: web::Data<AppState>,
    request: web::Json<TokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.verify_account(&request.token).await {
        Ok(_) => HttpResponse::Ok().json(StatusMessageResponse {
            message: "user account verified".to_string(),
            status: "ok".to_string(),
        }),
        Err(error) => handle_domain_error_in(error, ErrorContext::Verification),
    }
}

/// Handler for POST /api/v1/auth/resend-verification
///
/// Mails a fresh verification token; verified accounts get nothing.
pub async fn resend_verification(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.resend_verification(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("verification mail sent")),
        Err(error) => handle_domain_error(error),
    }
}
