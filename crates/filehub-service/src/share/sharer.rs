//! Sharing files with other users.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_database::repositories::{
    FileRepository, FolderRepository, SharerRepository, UserRepository,
};
use filehub_entity::file::File;
use filehub_entity::folder::{FileSharerEntry, FolderView, SharerRef};
use filehub_entity::share::SharedFile;

use crate::context::RequestContext;
use crate::folder::views::load_folder;

const FILE_NOT_FOUND: &str = "File could not been found.";
const SHARER_NOT_FOUND: &str = "Sharer could not been found.";
const SHARED_FILE_NOT_FOUND: &str = "Shared file could not been found.";
/// Returned for every rejected sharee so callers cannot probe accounts.
pub const INVALID_SHAREE: &str = "email is invalid.";

/// Result of sharing a file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedShare {
    /// The new sharing edge.
    pub new_share: FileSharerEntry,
    /// View of the folder holding the file.
    pub current_folder: FolderView,
}

/// Manages sharing edges between files and users.
#[derive(Debug, Clone)]
pub struct SharerService {
    /// Sharing edge repository.
    sharer_repo: Arc<SharerRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl SharerService {
    /// Creates a new sharer service.
    pub fn new(
        sharer_repo: Arc<SharerRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            sharer_repo,
            file_repo,
            folder_repo,
            user_repo,
        }
    }

    /// Lists files shared with the caller.
    pub async fn list_shared(&self, ctx: &RequestContext) -> AppResult<Vec<SharedFile>> {
        self.sharer_repo.list_shared_to(ctx.user_pk).await
    }

    /// Shares one of the caller's files with the user registered under `email`.
    ///
    /// An unknown email, the owner's own email and an existing sharee all
    /// fail the same way.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        email: &str,
    ) -> AppResult<CreatedShare> {
        let file = self.find_owned(ctx, file_id).await?;

        let sharee = self
            .user_repo
            .find_by_email(email)
            .await?
            .filter(|user| user.pk != ctx.user_pk)
            .ok_or_else(|| AppError::field("email", INVALID_SHAREE))?;

        if self.sharer_repo.exists(file.pk, sharee.pk).await? {
            return Err(AppError::field("email", INVALID_SHAREE));
        }
        self.sharer_repo.add(file.pk, sharee.pk).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            sharer_id = %sharee.id,
            "File shared"
        );

        Ok(CreatedShare {
            new_share: FileSharerEntry {
                sharer: SharerRef {
                    id: sharee.id,
                    email: sharee.email,
                },
            },
            current_folder: self.folder_view(&file).await?,
        })
    }

    /// Stops sharing one of the caller's files with the user `sharer_id`.
    pub async fn unshare(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        sharer_id: Uuid,
    ) -> AppResult<FolderView> {
        let file = self.find_owned(ctx, file_id).await?;

        let sharer = self
            .user_repo
            .find_by_id(sharer_id)
            .await?
            .ok_or_else(|| AppError::not_found(SHARER_NOT_FOUND))?;
        if !self.sharer_repo.remove(file.pk, sharer.pk).await? {
            return Err(AppError::not_found(SHARER_NOT_FOUND));
        }

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            sharer_id = %sharer.id,
            "File unshared"
        );

        self.folder_view(&file).await
    }

    /// Removes the caller's own access to a file shared with them.
    pub async fn leave(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        if !self.sharer_repo.remove_shared_to(ctx.user_pk, file_id).await? {
            return Err(AppError::not_found(SHARED_FILE_NOT_FOUND));
        }
        info!(user_id = %ctx.user_id, file_id = %file_id, "Shared file removed");
        Ok(())
    }

    async fn find_owned(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        self.file_repo
            .find_owned(ctx.user_pk, file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))
    }

    async fn folder_view(&self, file: &File) -> AppResult<FolderView> {
        let folder = load_folder(&self.folder_repo, file.folder_pk).await?;
        self.folder_repo.view(&folder).await
    }
}
