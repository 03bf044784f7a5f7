//! File upload, rename, delete and signed downloads.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use filehub_core::config::StorageConfig;
use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;
use filehub_database::repositories::{FileRepository, FolderRepository};
use filehub_entity::file::{CreateFile, File};

use crate::context::RequestContext;
use crate::folder::FolderViews;
use crate::folder::views::load_folder;

const FILE_NOT_FOUND: &str = "File could not been found.";
const FOLDER_NOT_FOUND: &str = "Folder could not been found.";
/// Message for uploads over the size limit.
pub const FILE_TOO_LARGE: &str = "File size must be less than 1 MB.";

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name.
    pub name: String,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// The MIME type to record: the declared type, else one guessed from
    /// the file name.
    pub fn mime_type(&self) -> String {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(&self.name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            })
    }
}

/// Manages the caller's files.
#[derive(Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Object storage.
    storage: Arc<dyn StorageProvider>,
    /// Largest accepted upload in bytes.
    max_upload_size: u64,
    /// Lifetime of download URLs.
    url_ttl: Duration,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("max_upload_size", &self.max_upload_size)
            .field("url_ttl", &self.url_ttl)
            .finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
            max_upload_size: config.max_upload_size_bytes,
            url_ttl: Duration::from_secs(config.signed_url_ttl_seconds),
        }
    }

    /// Uploads a file into one of the caller's folders.
    ///
    /// The object is written first; if recording it fails the object is
    /// removed again before the error is returned.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        upload: UploadedFile,
    ) -> AppResult<FolderViews> {
        if upload.data.len() as u64 > self.max_upload_size {
            return Err(AppError::payload_too_large(FILE_TOO_LARGE));
        }

        let folder = self
            .folder_repo
            .find_owned(ctx.user_pk, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(FOLDER_NOT_FOUND))?;

        let id = Uuid::new_v4();
        let object_key = File::object_key_for(folder.id, id);
        let mime_type = upload.mime_type();
        let size = upload.data.len() as i64;

        self.storage
            .put(&object_key, upload.data, &mime_type)
            .await?;

        let created = self
            .file_repo
            .create(&CreateFile {
                id,
                name: upload.name,
                size,
                mime_type,
                object_key: object_key.clone(),
                owner_pk: ctx.user_pk,
                folder_pk: folder.pk,
            })
            .await;

        let file = match created {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&object_key).await {
                    warn!(key = %object_key, error = %cleanup, "Failed to remove orphaned upload");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = %folder.id,
            size = file.size,
            "File uploaded"
        );

        FolderViews::load(&self.folder_repo, &folder).await
    }

    /// Renames one of the caller's files.
    pub async fn rename(&self, ctx: &RequestContext, file_id: Uuid, name: &str) -> AppResult<FolderViews> {
        let file = self.find_owned(ctx, file_id).await?;
        let renamed = self.file_repo.rename(file.pk, name).await?;

        info!(user_id = %ctx.user_id, file_id = %renamed.id, "File renamed");

        let folder = load_folder(&self.folder_repo, renamed.folder_pk).await?;
        FolderViews::load(&self.folder_repo, &folder).await
    }

    /// Deletes one of the caller's files with its sharing edges and public link.
    pub async fn delete(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<FolderViews> {
        let file = self.find_owned(ctx, file_id).await?;

        if let Err(e) = self.storage.delete(&file.object_key).await {
            warn!(file_id = %file.id, error = %e, "Failed to delete stored object");
        }
        self.file_repo.delete_with_links(file.pk).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File deleted");

        let folder = load_folder(&self.folder_repo, file.folder_pk).await?;
        FolderViews::load(&self.folder_repo, &folder).await
    }

    /// Mints a short-lived download URL for a file the caller owns or was
    /// shared.
    pub async fn download_url(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<String> {
        let file = self
            .file_repo
            .find_accessible(ctx.user_pk, file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))?;

        self.storage
            .signed_download_url(&file.object_key, self.url_ttl)
            .await
    }

    async fn find_owned(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        self.file_repo
            .find_owned(ctx.user_pk, file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))
    }
}
