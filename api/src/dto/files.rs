use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of the upload endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    #[serde(rename = "fileType")]
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFileRequest {
    /// Public URL returned by the upload endpoint
    #[validate(length(min = 1, message = "file is required"))]
    pub file: String,
}
