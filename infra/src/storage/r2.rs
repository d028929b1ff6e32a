//! Cloudflare R2 object storage
//!
//! R2 speaks the S3 API, so the AWS SDK client is pointed at the account
//! endpoint with the fixed `auto` region.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use lr_core::errors::DomainError;
use lr_core::services::ObjectStorage;

use crate::config::StorageConfig;
use crate::InfrastructureError;

const R2_REGION: &str = "auto";

/// `ObjectStorage` implementation over an R2 bucket
#[derive(Clone)]
pub struct R2ObjectStorage {
    client: S3Client,
    bucket: String,
}

impl R2ObjectStorage {
    /// Create a new R2 client for the configured bucket
    pub async fn new(config: &StorageConfig) -> Result<Self, InfrastructureError> {
        if config.bucket.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "CLOUDFLARE_BUCKET must not be empty".to_string(),
            ));
        }

        let credentials_provider = aws_credential_types::Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "light_room_r2_storage",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(R2_REGION))
            .endpoint_url(&config.bucket_url)
            .credentials_provider(credentials_provider)
            .load()
            .await;

        let client = S3Client::new(&aws_config);

        tracing::info!("R2 object storage initialized for bucket: {}", config.bucket);

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStorage for R2ObjectStorage {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), DomainError> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to upload {}: {}", key, e);
                InfrastructureError::Storage(format!("upload of {} failed: {}", key, e))
            })?;

        tracing::debug!(key, size, content_type, "Object uploaded");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete {}: {}", key, e);
                InfrastructureError::Storage(format!("delete of {} failed: {}", key, e))
            })?;

        tracing::debug!(key, "Object deleted");
        Ok(())
    }
}
