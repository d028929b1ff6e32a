//! Application state and factory
//!
//! This module holds the services shared by every worker and builds the
//! actix-web application with its routes and middleware.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use lr_core::services::{AuthService, FileService, SessionService};
use lr_shared::config::server::DEFAULT_MAX_UPLOAD_BYTES;
use lr_shared::{error_codes, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::json_error_handler;
use crate::middleware::{JwtAuth, RequestTiming};
use crate::routes::{auth, files, health::health_check};

/// Services shared by the request handlers
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub session_service: Arc<SessionService>,
    pub file_service: Arc<FileService>,
    /// Upper bound on the bytes accepted by one upload request
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, file_service: Arc<FileService>) -> Self {
        Self {
            session_service: Arc::clone(auth_service.session_service()),
            auth_service,
            file_service,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let jwt_auth = JwtAuth::new(Arc::clone(&app_state.session_service));
    let json_config = web::JsonConfig::default().error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // TracingLogger wraps last so it sees the timed response
        .wrap(RequestTiming)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/sign-up", web::post().to(auth::sign_up))
                        .route("/login", web::post().to(auth::login))
                        .route("/account-verification", web::post().to(auth::verify_account))
                        .route("/resend-verification", web::post().to(auth::resend_verification))
                        .route("/refresh", web::post().to(auth::refresh))
                        .route("/forgot-password", web::post().to(auth::forgot_password))
                        .route("/reset-password", web::post().to(auth::reset_password))
                        .service(
                            web::resource("/me")
                                .wrap(jwt_auth.clone())
                                .route(web::get().to(auth::me)),
                        )
                        .service(
                            web::resource("/logout")
                                .wrap(jwt_auth.clone())
                                .route(web::post().to(auth::logout)),
                        ),
                )
                .service(
                    web::scope("/misc")
                        .wrap(jwt_auth)
                        .route("/upload-file", web::post().to(files::upload_file))
                        .route("/delete-file", web::post().to(files::delete_file)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
