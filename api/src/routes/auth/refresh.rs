use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::AccessTokenResponse;
use crate::handlers::error::{bad_request, handle_domain_error_in, ErrorContext};

/// Header carrying the refresh token
pub const REFRESH_HEADER: &str = "Refresh";

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges the refresh token in the `Refresh` header for a new access token.
///
/// ## Success (200 OK)
/// ```json
/// { "access_token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Header missing, token expired, invalid or malformed
/// - 401 Unauthorized: Token has been revoked
pub async fn refresh(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let refresh_token = req
        .headers()
        .get(REFRESH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(refresh_token) = refresh_token else {
        return bad_request("refresh token not provided");
    };

    match state.auth_service.refresh(refresh_token).await {
        Ok(access_token) => HttpResponse::Ok().json(AccessTokenResponse { access_token }),
        Err(error) => handle_domain_error_in(error, ErrorContext::Refresh),
    }
}
