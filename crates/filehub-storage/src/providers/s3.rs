//! S3-compatible object storage provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::operation::delete_objects::DeleteObjectsOutput;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use bytes::Bytes;
use tracing::{debug, info};

use filehub_core::config::S3StorageConfig;
use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;

/// `DeleteObjects` accepts at most this many keys per request.
const DELETE_BATCH: usize = 1000;

/// S3-compatible storage provider.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    /// Create a new S3 storage provider.
    ///
    /// Static credentials are used when an access key is configured,
    /// otherwise the default AWS credential chain is loaded.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket must be set"));
        }

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let region = Region::new(config.region.clone());
        let mut builder = if config.access_key.is_empty() {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await;
            aws_sdk_s3::config::Builder::from(&shared)
        } else {
            aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(Credentials::new(
                    &config.access_key,
                    &config.secret_key,
                    None,
                    None,
                    "filehub-config",
                ))
        };

        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }
        builder = builder.force_path_style(config.force_path_style);

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }

    /// Deletes one batch and returns the keys S3 refused to delete.
    async fn delete_batch(&self, keys: Vec<String>) -> AppResult<Vec<String>> {
        let objects = keys
            .into_iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Invalid object key", e))?;
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Invalid delete request", e))?;

        let output = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete objects", e))?;
        Ok(failed_keys(&output))
    }
}

/// Per-key failures reported inside a successful `DeleteObjects` response.
fn failed_keys(output: &DeleteObjectsOutput) -> Vec<String> {
    output
        .errors()
        .iter()
        .map(|err| {
            format!(
                "{} ({})",
                err.key().unwrap_or("<unknown>"),
                err.code().unwrap_or("UnknownError")
            )
        })
        .collect()
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let len = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, format!("Failed to upload object: {key}"), e)
            })?;
        debug!(key, bytes = len, "Uploaded object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, format!("Failed to delete object: {key}"), e)
            })?;
        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        let namespace = format!("{}/", prefix.trim_end_matches('/'));
        let mut continuation_token = None;
        let mut deleted = 0u64;
        let mut failed = Vec::new();

        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&namespace);
            if let Some(token) = continuation_token {
                req = req.continuation_token(token);
            }
            let resp = req.send().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list objects under {namespace}"),
                    e,
                )
            })?;

            let keys: Vec<String> = resp
                .contents()
                .iter()
                .filter_map(|obj| obj.key().map(str::to_string))
                .collect();

            for batch in keys.chunks(DELETE_BATCH) {
                let refused = self.delete_batch(batch.to_vec()).await?;
                deleted += (batch.len() - refused.len()) as u64;
                failed.extend(refused);
            }

            continuation_token = resp.next_continuation_token().map(str::to_string);
            if continuation_token.is_none() {
                break;
            }
        }

        if !failed.is_empty() {
            return Err(AppError::storage(format!(
                "Failed to delete {} of {} objects under {namespace}: {}",
                failed.len(),
                deleted + failed.len() as u64,
                failed.join(", ")
            )));
        }

        debug!(prefix, deleted, "Deleted namespace");
        Ok(deleted)
    }

    async fn signed_download_url(&self, key: &str, ttl: Duration) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid signed url lifetime", e)
        })?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, format!("Failed to sign url for {key}"), e)
            })?;
        Ok(request.uri().to_string())
    }
}
