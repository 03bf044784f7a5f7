//! Folder CRUD operations and the recursive delete engine.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;
use filehub_database::repositories::{FileRepository, FolderRepository, PurgeCounts};
use filehub_entity::folder::{CreateFolder, Folder, FolderListItem, FolderView};

use super::tree::collect_subtree;
use super::views::{FolderViews, load_folder};
use crate::context::RequestContext;

const FOLDER_NOT_FOUND: &str = "Folder could not been found.";
const PARENT_NOT_FOUND: &str = "Parent folder could not been found.";
const CONTENTS_CHANGED: &str = "Folder contents have changed, please refresh.";

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Object storage holding file contents.
    storage: Arc<dyn StorageProvider>,
}

/// Result of creating a subfolder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFolder {
    /// The new folder.
    pub new_folder: Folder,
    /// Views around the folder it was created in.
    #[serde(flatten)]
    pub views: FolderViews,
}

/// Result of a recursive folder delete.
#[derive(Debug, Clone)]
pub struct DeletedFolder {
    /// Views around the parent of the deleted folder.
    pub views: FolderViews,
    /// Rows removed by the purge.
    pub removed: PurgeCounts,
    /// Storage namespaces that were cleared.
    pub cleared_namespaces: usize,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            storage,
        }
    }

    /// Lists every folder of the caller.
    pub async fn list_folders(&self, ctx: &RequestContext) -> AppResult<Vec<FolderListItem>> {
        self.folder_repo.list_for_owner(ctx.user_pk).await
    }

    /// Gets the view of one of the caller's folders.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<FolderView> {
        let folder = self.find_owned(ctx, folder_id, FOLDER_NOT_FOUND).await?;
        self.folder_repo.view(&folder).await
    }

    /// Creates a subfolder under `parent_id`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
        name: &str,
    ) -> AppResult<CreatedFolder> {
        let parent = self.find_owned(ctx, parent_id, PARENT_NOT_FOUND).await?;

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                owner_pk: ctx.user_pk,
                parent_pk: Some(parent.pk),
                name: name.to_string(),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = %parent.id,
            "Folder created"
        );

        Ok(CreatedFolder {
            new_folder: folder,
            views: FolderViews::load(&self.folder_repo, &parent).await?,
        })
    }

    /// Renames a folder. The root folder cannot be renamed.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        name: &str,
    ) -> AppResult<FolderViews> {
        let folder = self.find_owned_non_root(ctx, folder_id).await?;
        let renamed = self.folder_repo.rename(folder.pk, name).await?;

        info!(user_id = %ctx.user_id, folder_id = %renamed.id, "Folder renamed");

        FolderViews::load(&self.folder_repo, &renamed).await
    }

    /// Recursively deletes a folder, its subfolders and their files.
    ///
    /// `expected_ids` is the caller's view of which subtree folders hold
    /// files. When given, it must match the current tree exactly or the
    /// delete is refused with a conflict.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        expected_ids: Option<&[String]>,
    ) -> AppResult<DeletedFolder> {
        let target = self.find_owned_non_root(ctx, folder_id).await?;

        let nodes = self.folder_repo.list_nodes(ctx.user_pk).await?;
        let with_files: HashSet<i64> = self
            .folder_repo
            .folders_with_files(ctx.user_pk)
            .await?
            .into_iter()
            .collect();

        let subtree = collect_subtree(&nodes, target.pk);
        let non_empty: Vec<_> = subtree
            .iter()
            .filter(|node| with_files.contains(&node.pk))
            .collect();

        if let Some(expected) = expected_ids {
            let parsed: Option<HashSet<Uuid>> = expected
                .iter()
                .map(|id| Uuid::parse_str(id).ok())
                .collect();
            let actual: HashSet<Uuid> = non_empty.iter().map(|n| n.id).collect();
            if parsed.as_ref() != Some(&actual) {
                return Err(AppError::conflict(CONTENTS_CHANGED));
            }
        }

        let non_empty_pks: Vec<i64> = non_empty.iter().map(|n| n.pk).collect();
        let file_pks = self.file_repo.pks_in_folders(&non_empty_pks).await?;

        for node in &non_empty {
            let namespace = node.id.to_string();
            if let Err(e) = self.storage.delete_by_prefix(&namespace).await {
                warn!(folder_id = %node.id, error = %e, "Failed to clear storage namespace");
            }
        }

        let deepest_first: Vec<i64> = subtree.iter().rev().map(|n| n.pk).collect();
        let removed = self
            .folder_repo
            .purge_subtree(&deepest_first, &file_pks)
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %target.id,
            folders = removed.folders,
            files = removed.files,
            "Folder deleted"
        );

        let parent_pk = target
            .parent_pk
            .ok_or_else(|| AppError::internal("Deleted folder had no parent"))?;
        let parent = load_folder(&self.folder_repo, parent_pk).await?;

        Ok(DeletedFolder {
            views: FolderViews::load(&self.folder_repo, &parent).await?,
            removed,
            cleared_namespaces: non_empty.len(),
        })
    }

    async fn find_owned(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        missing: &str,
    ) -> AppResult<Folder> {
        self.folder_repo
            .find_owned(ctx.user_pk, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(missing))
    }

    async fn find_owned_non_root(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        self.find_owned(ctx, folder_id, FOLDER_NOT_FOUND)
            .await
            .and_then(|folder| {
                if folder.is_root() {
                    Err(AppError::not_found(FOLDER_NOT_FOUND))
                } else {
                    Ok(folder)
                }
            })
    }
}
