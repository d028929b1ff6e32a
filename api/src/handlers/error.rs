//! Conversion of domain errors into HTTP responses
//!
//! Every failing endpoint answers with `{"error": "<code>", "detail": "<message>"}`.
//! A few token failures answer differently depending on the endpoint, so
//! handlers pass an `ErrorContext` alongside the error.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use lr_core::errors::{AuthError, DomainError, TokenError};
use lr_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Endpoint family an error is reported for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    General,
    /// Bearer token check on protected routes
    Gate,
    Refresh,
    Verification,
    PasswordReset,
}

/// Resolve the status, code and client-facing message for a domain error
pub fn classify(error: &DomainError, context: ErrorContext) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Token(token_error) => classify_token(token_error, context),
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserAlreadyExists => (
                StatusCode::BAD_REQUEST,
                error_codes::USER_EXISTS,
                "user already exists".to_string(),
            ),
            AuthError::UserNotFound => (
                StatusCode::NOT_FOUND,
                error_codes::USER_NOT_FOUND,
                "user not found".to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::NOT_FOUND,
                error_codes::INVALID_CREDENTIALS,
                "wrong credentials".to_string(),
            ),
            AuthError::AccountNotVerified => (
                StatusCode::BAD_REQUEST,
                error_codes::ACCOUNT_NOT_VERIFIED,
                "account not verified".to_string(),
            ),
        },
        DomainError::ValidationErr(validation_error) => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            validation_error.to_string(),
        ),
        DomainError::StoreUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::CACHE_ERROR,
            "session store temporarily unavailable".to_string(),
        ),
        DomainError::Mail { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::MAIL_ERROR,
            "mail could not be sent".to_string(),
        ),
        DomainError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::STORAGE_ERROR,
            "file storage request failed".to_string(),
        ),
        DomainError::Configuration { .. } | DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "an internal error occurred".to_string(),
        ),
    }
}

fn classify_token(error: &TokenError, context: ErrorContext) -> (StatusCode, &'static str, String) {
    match error {
        TokenError::TokenNotFound => {
            let (status, detail) = match context {
                ErrorContext::Verification => {
                    (StatusCode::NOT_FOUND, "verification token has expired/not found")
                }
                ErrorContext::PasswordReset => {
                    (StatusCode::BAD_REQUEST, "reset token has expired/not found")
                }
                _ => (StatusCode::NOT_FOUND, "token has expired/not found"),
            };
            (status, error_codes::TOKEN_NOT_FOUND, detail.to_string())
        }
        TokenError::TokenRevoked => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_REVOKED,
            "invalidated token provided".to_string(),
        ),
        TokenError::TokenGenerationFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "an internal error occurred".to_string(),
        ),
        TokenError::TokenExpired | TokenError::TokenInvalid | TokenError::TokenMalformed => {
            let code = match error {
                TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
                TokenError::TokenMalformed => error_codes::TOKEN_MALFORMED,
                _ => error_codes::TOKEN_INVALID,
            };
            let status = match context {
                ErrorContext::Refresh => StatusCode::BAD_REQUEST,
                _ => StatusCode::UNAUTHORIZED,
            };
            (status, code, error.to_string().to_lowercase())
        }
    }
}

/// Handle domain errors outside any endpoint-specific context
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    handle_domain_error_in(error, ErrorContext::General)
}

/// Handle domain errors with the status rules of the given endpoint family
pub fn handle_domain_error_in(error: DomainError, context: ErrorContext) -> HttpResponse {
    let (status, code, detail) = classify(&error, context);

    if error.is_infrastructure() {
        tracing::error!(?context, %status, "Backing service failed: {}", error);
    } else if status.is_server_error() {
        tracing::error!(?context, "Request failed: {}", error);
    } else {
        tracing::debug!(?context, %status, "Request rejected: {}", error);
    }

    if status == StatusCode::UNAUTHORIZED {
        return unauthorized(code, detail);
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, detail))
}

/// 401 carrying the bearer challenge header
pub fn unauthorized(code: &str, detail: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(ErrorResponse::new(code, detail))
}

pub fn bad_request(detail: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, detail))
}

/// 400 listing the fields that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is not valid", field),
            })
        })
        .collect();
    fields.sort();

    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        fields.join("; "),
    ))
}

/// `JsonConfig` error handler: unreadable bodies are 422
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = format!("body not valid: {}", err);
    let response = HttpResponse::UnprocessableEntity()
        .json(ErrorResponse::new(error_codes::UNPROCESSABLE_ENTITY, detail));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lr_core::errors::ValidationError;

    fn status_of(error: DomainError, context: ErrorContext) -> StatusCode {
        classify(&error, context).0
    }

    #[test]
    fn test_token_not_found_depends_on_context() {
        assert_eq!(
            status_of(TokenError::TokenNotFound.into(), ErrorContext::Verification),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TokenError::TokenNotFound.into(), ErrorContext::PasswordReset),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_refresh_failures_are_bad_request_except_revoked() {
        for error in [
            TokenError::TokenExpired,
            TokenError::TokenInvalid,
            TokenError::TokenMalformed,
        ] {
            assert_eq!(status_of(error.into(), ErrorContext::Refresh), StatusCode::BAD_REQUEST);
        }
        assert_eq!(
            status_of(TokenError::TokenRevoked.into(), ErrorContext::Refresh),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_gate_failures_are_unauthorized() {
        for error in [
            TokenError::TokenExpired,
            TokenError::TokenInvalid,
            TokenError::TokenMalformed,
            TokenError::TokenRevoked,
        ] {
            assert_eq!(status_of(error.into(), ErrorContext::Gate), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into(), ErrorContext::General),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AuthError::AccountNotVerified.into(), ErrorContext::General),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AuthError::UserAlreadyExists.into(), ErrorContext::General),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AuthError::UserNotFound.into(), ErrorContext::General),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_infrastructure_errors_hide_details() {
        let error = DomainError::StoreUnavailable {
            message: "redis://secret@host refused".to_string(),
        };
        let (status, code, detail) = classify(&error, ErrorContext::General);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, error_codes::CACHE_ERROR);
        assert!(!detail.contains("secret"));

        let (status, _, _) = classify(
            &DomainError::Internal { message: "boom".to_string() },
            ErrorContext::General,
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let error: DomainError = ValidationError::RequiredField {
            field: "fileType".to_string(),
        }
        .into();
        let (status, code, detail) = classify(&error, ErrorContext::General);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, error_codes::VALIDATION_ERROR);
        assert!(detail.contains("fileType"));
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = handle_domain_error_in(TokenError::TokenRevoked.into(), ErrorContext::Gate);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
