use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::SignUpRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/sign-up
///
/// Creates an unverified account and mails a verification token to it.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada",
///     "email": "ada@example.com",
///     "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "user_id": "2f0d...",
///     "name": "Ada",
///     "email": "ada@example.com",
///     "is_verified": false
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid body or email already registered
/// - 422 Unprocessable Entity: Body is not valid JSON
pub async fn sign_up(
    state: web::Data<AppState>,
    request: web::Json<SignUpRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .register(&request.name, &request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(user),
        Err(error) => handle_domain_error(error),
    }
}
