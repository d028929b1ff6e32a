use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use lr_core::services::{FileType, UploadedFile};
use lr_shared::{error_codes, ErrorResponse};

use crate::app::AppState;
use crate::dto::files::UploadQuery;
use crate::handlers::error::{bad_request, handle_domain_error};
use crate::middleware::auth::AuthContext;

/// Multipart field holding the uploaded files
pub const FILES_FIELD: &str = "files";

enum ReadError {
    Multipart(MultipartError),
    TooLarge,
}

impl From<MultipartError> for ReadError {
    fn from(err: MultipartError) -> Self {
        ReadError::Multipart(err)
    }
}

/// Handler for POST /api/v1/misc/upload-file?fileType=PROFILE|PORTFOLIO
///
/// Stores every part of the `files` field and returns their public URLs in
/// upload order.
///
/// ## Success (200 OK)
/// ```json
/// ["https://cdn.example.com/production/PROFILE/avatar.png"]
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or unknown file type, unreadable form, no files
/// - 413 Payload Too Large: Files exceed the upload limit
pub async fn upload_file(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<UploadQuery>,
    payload: Multipart,
) -> HttpResponse {
    let file_type: FileType = match query.file_type.as_deref().unwrap_or_default().parse() {
        Ok(file_type) => file_type,
        Err(error) => return handle_domain_error(error.into()),
    };

    let files = match read_files(payload, state.max_upload_bytes).await {
        Ok(files) => files,
        Err(ReadError::TooLarge) => {
            return HttpResponse::PayloadTooLarge().json(ErrorResponse::new(
                error_codes::PAYLOAD_TOO_LARGE,
                format!("files exceed {} bytes", state.max_upload_bytes),
            ))
        }
        Err(ReadError::Multipart(err)) => {
            tracing::debug!("Multipart parse failed: {}", err);
            return bad_request("could not parse files");
        }
    };

    if files.is_empty() {
        return bad_request("no files provided");
    }

    match state.file_service.upload(file_type, files).await {
        Ok(urls) => {
            tracing::info!(user_id = %auth.user_id, count = urls.len(), "Files uploaded");
            HttpResponse::Ok().json(urls)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Collect the parts of the `files` field, enforcing the total size limit
async fn read_files(mut payload: Multipart, limit: usize) -> Result<Vec<UploadedFile>, ReadError> {
    let mut files = Vec::new();
    let mut total = 0usize;

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(FILES_FIELD) {
            // drain parts we do not use
            while field.try_next().await?.is_some() {}
            continue;
        }

        let file_name = file_name_of(&field);
        let content_type = field.content_type().map(|mime| mime.essence_str().to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            total += chunk.len();
            if total > limit {
                return Err(ReadError::TooLarge);
            }
            bytes.extend_from_slice(&chunk);
        }

        files.push(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }

    Ok(files)
}

fn file_name_of(field: &Field) -> String {
    field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string()
}
