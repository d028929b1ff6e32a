//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the access token from the Authorization header,
//! checks it with the `SessionService` (signature, expiry, purpose and the
//! revocation list) and injects an `AuthContext` into the request.
//!
//! A header carrying a bare token without the `Bearer ` prefix is accepted.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use lr_core::services::SessionService;
use lr_shared::error_codes;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::error::{handle_domain_error_in, unauthorized, ErrorContext};

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject of the access token
    pub user_id: Uuid,
    /// The access token as presented, without the `Bearer ` prefix
    pub token: String,
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    session_service: Arc<SessionService>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            session_service: Arc::clone(&self.session_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    session_service: Arc<SessionService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let session_service = Arc::clone(&self.session_service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    let response = unauthorized(error_codes::UNAUTHORIZED, "not authenticated");
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let user_id = match session_service.authenticate(&token).await {
                Ok(user_id) => user_id,
                Err(error) => {
                    let response = handle_domain_error_in(error, ErrorContext::Gate);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext { user_id, token });

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Extracts the token from the Authorization header
///
/// `Bearer <token>` and a bare `<token>` are both accepted.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => value.trim(),
    };

    if token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
