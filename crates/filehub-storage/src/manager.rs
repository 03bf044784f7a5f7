//! Storage provider factory.

use std::sync::Arc;

use tracing::info;

use filehub_core::config::{AuthConfig, StorageConfig};
use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Build the provider selected by `storage.provider`.
pub async fn build_provider(
    storage: &StorageConfig,
    auth: &AuthConfig,
) -> AppResult<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match storage.provider.as_str() {
        "local" => Arc::new(
            LocalStorageProvider::new(
                &storage.local.root_path,
                &storage.local.public_base_url,
                &auth.jwt_secret,
            )
            .await?,
        ),
        #[cfg(feature = "s3")]
        "s3" => Arc::new(crate::providers::S3StorageProvider::new(&storage.s3).await?),
        other => {
            return Err(AppError::configuration(format!(
                "Unsupported storage provider: '{other}'"
            )));
        }
    };

    info!(provider = provider.provider_type(), "Storage provider ready");
    Ok(provider)
}
