use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::files::DeleteFileRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/misc/delete-file
///
/// Deletes the object behind a URL previously returned by upload-file.
///
/// ## Success (200 OK)
/// ```json
/// {}
/// ```
pub async fn delete_file(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<DeleteFileRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.file_service.delete(&request.file).await {
        Ok(()) => {
            tracing::info!(user_id = %auth.user_id, "File deleted");
            HttpResponse::Ok().json(serde_json::json!({}))
        }
        Err(error) => handle_domain_error(error),
    }
}
