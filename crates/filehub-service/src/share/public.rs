//! Anonymous public links.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use filehub_core::config::StorageConfig;
use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;
use filehub_database::repositories::{FileRepository, FolderRepository, PublicFileRepository};
use filehub_entity::folder::FolderView;
use filehub_entity::share::PublicFileDetails;

use crate::context::RequestContext;
use crate::folder::views::load_folder;

const FILE_NOT_FOUND: &str = "File could not been found.";
const PUBLIC_FILE_NOT_FOUND: &str = "Public file could not been found.";
const PUBLIC_DOWNLOAD_NOT_FOUND: &str = "The public file you are looking for could not be found.";

/// Result of publishing a file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPublicFile {
    /// Public id of the new link.
    pub public_file_id: Uuid,
    /// View of the folder holding the file.
    pub current_folder: FolderView,
}

/// A public file as seen by an anonymous visitor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFileResponse {
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    /// Signed download URL.
    pub url: String,
}

/// Manages public links and anonymous access to them.
#[derive(Clone)]
pub struct PublicFileService {
    public_repo: Arc<PublicFileRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    storage: Arc<dyn StorageProvider>,
    url_ttl: Duration,
}

impl std::fmt::Debug for PublicFileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicFileService")
            .field("url_ttl", &self.url_ttl)
            .finish()
    }
}

impl PublicFileService {
    /// Creates a new public file service.
    pub fn new(
        public_repo: Arc<PublicFileRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            public_repo,
            file_repo,
            folder_repo,
            storage,
            url_ttl: Duration::from_secs(config.signed_url_ttl_seconds),
        }
    }

    /// Publishes one of the caller's files. A file has at most one link.
    pub async fn create(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<CreatedPublicFile> {
        let file = self
            .file_repo
            .find_owned(ctx.user_pk, file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))?;

        let public = self.public_repo.create(file.pk).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            public_file_id = %public.id,
            "Public file created"
        );

        let folder = load_folder(&self.folder_repo, file.folder_pk).await?;
        Ok(CreatedPublicFile {
            public_file_id: public.id,
            current_folder: self.folder_repo.view(&folder).await?,
        })
    }

    /// Resolves a public link with a fresh download URL.
    pub async fn get(&self, public_id: Uuid) -> AppResult<PublicFileResponse> {
        let details = self.details(public_id, PUBLIC_FILE_NOT_FOUND).await?;
        let url = self.sign(&details).await?;
        Ok(PublicFileResponse {
            id: details.id,
            name: details.name,
            size: details.size,
            mime_type: details.mime_type,
            created_at: details.created_at,
            url,
        })
    }

    /// Mints a download URL for a public link.
    pub async fn download_url(&self, public_id: Uuid) -> AppResult<String> {
        let details = self.details(public_id, PUBLIC_DOWNLOAD_NOT_FOUND).await?;
        self.sign(&details).await
    }

    /// Removes the public link of one of the caller's files.
    pub async fn delete(&self, ctx: &RequestContext, public_id: Uuid) -> AppResult<FolderView> {
        let public = self
            .public_repo
            .find_owned(ctx.user_pk, public_id)
            .await?
            .ok_or_else(|| AppError::not_found(PUBLIC_FILE_NOT_FOUND))?;

        self.public_repo.delete(public.pk).await?;
        info!(user_id = %ctx.user_id, public_file_id = %public.id, "Public file deleted");

        let file = self
            .file_repo
            .find_by_pk(public.file_pk)
            .await?
            .ok_or_else(|| AppError::internal("Public file pointed at a missing file"))?;
        let folder = load_folder(&self.folder_repo, file.folder_pk).await?;
        self.folder_repo.view(&folder).await
    }

    async fn details(&self, public_id: Uuid, missing: &str) -> AppResult<PublicFileDetails> {
        self.public_repo
            .find_details(public_id)
            .await?
            .ok_or_else(|| AppError::not_found(missing))
    }

    async fn sign(&self, details: &PublicFileDetails) -> AppResult<String> {
        self.storage
            .signed_download_url(&details.object_key, self.url_ttl)
            .await
    }
}
