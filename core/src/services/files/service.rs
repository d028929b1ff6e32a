//! File service: storage keys, public URLs and validation

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use lr_shared::{Environment, StorageConfig};

use crate::errors::{DomainError, ValidationError};

use super::storage::ObjectStorage;

/// Content type recorded when the client sends none
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Folder an upload is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Profile,
    Portfolio,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Profile => "PROFILE",
            FileType::Portfolio => "PORTFOLIO",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(ValidationError::RequiredField {
                field: "fileType".to_string(),
            }),
            s if s.eq_ignore_ascii_case("PROFILE") => Ok(FileType::Profile),
            s if s.eq_ignore_ascii_case("PORTFOLIO") => Ok(FileType::Portfolio),
            _ => Err(ValidationError::InvalidFormat {
                field: "fileType".to_string(),
            }),
        }
    }
}

/// A file received from a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where uploads land and how they are addressed publicly
#[derive(Debug, Clone)]
pub struct FileServiceConfig {
    /// First key segment, one folder per deployment
    pub environment: String,
    /// Base of the URLs handed back to clients
    pub cdn_url: String,
    /// Bucket endpoint; URLs under it are also accepted for deletion
    pub bucket_url: String,
}

impl FileServiceConfig {
    pub fn new(environment: Environment, storage: &StorageConfig) -> Self {
        Self {
            environment: environment.as_str().to_string(),
            cdn_url: storage.cdn_url.trim_end_matches('/').to_string(),
            bucket_url: storage.bucket_url.trim_end_matches('/').to_string(),
        }
    }
}

pub struct FileService {
    storage: Arc<dyn ObjectStorage>,
    config: FileServiceConfig,
}

impl FileService {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: FileServiceConfig) -> Self {
        Self { storage, config }
    }

    /// Uploads each file and returns their public URLs in order
    ///
    /// Stops at the first failed upload.
    pub async fn upload(
        &self,
        file_type: FileType,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<String>, DomainError> {
        if files.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "files".to_string(),
            }
            .into());
        }

        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            let file_name = sanitize_file_name(&file.file_name)?;
            let key = self.object_key(file_type, &file_name);
            let content_type = file
                .content_type
                .as_deref()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            let size = file.bytes.len();

            self.storage.put(&key, file.bytes, &content_type).await?;
            debug!(key = %key, size, "Object uploaded");
            urls.push(format!("{}/{}", self.config.cdn_url, key));
        }

        info!(count = urls.len(), file_type = %file_type, "Files uploaded");
        Ok(urls)
    }

    /// Deletes the object behind a public URL
    pub async fn delete(&self, url: &str) -> Result<(), DomainError> {
        let key = self.key_from_url(url)?;
        self.storage.delete(key).await?;
        info!(key = %key, "Object deleted");
        Ok(())
    }

    /// `{environment}/{file_type}/{file_name}`
    pub fn object_key(&self, file_type: FileType, file_name: &str) -> String {
        format!("{}/{}/{}", self.config.environment, file_type, file_name)
    }

    fn key_from_url<'a>(&self, url: &'a str) -> Result<&'a str, DomainError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "file".to_string(),
            }
            .into());
        }

        [&self.config.bucket_url, &self.config.cdn_url]
            .iter()
            .filter_map(|base| url.strip_prefix(base.as_str()))
            .filter_map(|rest| rest.strip_prefix('/'))
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                ValidationError::InvalidFormat {
                    field: "file".to_string(),
                }
                .into()
            })
    }
}

/// Keeps the last path segment so a name cannot escape its folder
fn sanitize_file_name(name: &str) -> Result<String, DomainError> {
    let name = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("").trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(ValidationError::InvalidFormat {
            field: "filename".to_string(),
        }
        .into());
    }
    Ok(name.to_string())
}
