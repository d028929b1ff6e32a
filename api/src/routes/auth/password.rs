use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{EmailRequest, MessageResponse, ResetPasswordRequest};
use crate::handlers::error::{
    handle_domain_error, handle_domain_error_in, validation_error_response, ErrorContext,
};

/// Handler for POST /api/v1/auth/forgot-password
///
/// Mails a password reset token to the account.
///
/// ## Errors
/// - 404 Not Found: No account for the email
/// - 503 Service Unavailable: The mail could not be sent
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("password reset mail sent")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/auth/reset-password
///
/// ## Errors
/// - 400 Bad Request: Reset token unknown or expired
/// - 404 Not Found: The account no longer exists
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .reset_password(&request.token, &request.password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("password reset success")),
        Err(error) => handle_domain_error_in(error, ErrorContext::PasswordReset),
    }
}
