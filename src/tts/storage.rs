//! S3 object storage for synthesized audio

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::AppError;

/// Content type recorded on every stored object, whatever the output format.
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError>;

    /// Time-limited GET link for a stored object.
    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, AppError>;
}

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("PutObject failed: {}", DisplayErrorContext(&e))))?;

        Ok(())
    }

    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| AppError::Internal(format!("Invalid presign expiry: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::Provider(format!("Presigning GetObject failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(request.uri().to_string())
    }
}

/// `{prefix}{YYYY/MM/DD}/{id}.{extension}`
pub fn storage_key(prefix: &str, date: NaiveDate, id: Uuid, extension: &str) -> String {
    format!("{}{}/{}.{}", prefix, date.format("%Y/%m/%d"), id, extension)
}

/// Fresh key for today's UTC date. Uniqueness rests on the random v4 id.
pub fn new_storage_key(prefix: &str, extension: &str) -> String {
    storage_key(prefix, Utc::now().date_naive(), Uuid::new_v4(), extension)
}
