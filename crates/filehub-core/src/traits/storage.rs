//! Storage provider trait for pluggable object storage backends.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;
use crate::result::AppResult;

/// Trait for object storage backends.
///
/// Objects are addressed by flat keys of the form `"{namespace}/{name}"`.
/// The namespace is the public id of the folder that holds the file, so a
/// whole folder can be dropped with [`StorageProvider::delete_by_prefix`].
/// The trait is defined here in `filehub-core` and implemented in
/// `filehub-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store an object under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Delete the object under `key`. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete every object in the `prefix` namespace and return how many were removed.
    async fn delete_by_prefix(&self, prefix: &str) -> AppResult<u64>;

    /// Mint a time-limited URL that downloads the object under `key`.
    async fn signed_download_url(&self, key: &str, ttl: Duration) -> AppResult<String>;

    /// Resolve a download token minted by this provider into the object key
    /// and its bytes.
    ///
    /// Only backends that serve their own signed URLs implement this.
    async fn read_signed(&self, _token: &str) -> AppResult<(String, Bytes)> {
        Err(AppError::not_found(
            "The file you are looking for could not be found.",
        ))
    }
}
