//! Object storage configuration (Cloudflare R2 via the S3 API)

use serde::{Deserialize, Serialize};

use super::{required, ConfigError};

/// Bucket, endpoint and credentials for uploaded media
#[derive(Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// S3 endpoint of the account; also the prefix stripped from URLs on delete
    pub bucket_url: String,
    /// Public base URL prepended to object keys in upload responses
    pub cdn_url: String,
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl StorageConfig {
    /// Create from the `CLOUDFLARE_*` variables
    ///
    /// `CLOUDFLARE_CDN_URL` is optional and defaults to the bucket URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bucket_url = required("CLOUDFLARE_BUCKET_URL")?;
        let cdn_url = std::env::var("CLOUDFLARE_CDN_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| bucket_url.clone());

        Ok(Self {
            bucket: required("CLOUDFLARE_BUCKET")?,
            bucket_url: bucket_url.trim_end_matches('/').to_string(),
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
            account_id: required("CLOUDFLARE_ACCOUNT_ID")?,
            access_key_id: required("CLOUDFLARE_ACCESS_KEY_ID")?,
            secret_access_key: required("CLOUDFLARE_ACCESS_SECRET_KEY")?,
        })
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("bucket_url", &self.bucket_url)
            .field("cdn_url", &self.cdn_url)
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"****")
            .finish()
    }
}
