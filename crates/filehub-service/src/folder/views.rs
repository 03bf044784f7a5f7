//! The "self plus parent" folder views returned by mutating endpoints.

use serde::Serialize;

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_database::repositories::FolderRepository;
use filehub_entity::folder::{Folder, FolderView};

/// The affected folder and its parent, for client tree refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderViews {
    /// View of the affected folder.
    pub current_folder: FolderView,
    /// View of its parent, absent when the affected folder is the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<FolderView>,
}

impl FolderViews {
    /// Load the views around `folder`.
    pub async fn load(folders: &FolderRepository, folder: &Folder) -> AppResult<Self> {
        let current_folder = folders.view(folder).await?;
        let parent_folder = match folder.parent_pk {
            Some(parent_pk) => {
                let parent = load_folder(folders, parent_pk).await?;
                Some(folders.view(&parent).await?)
            }
            None => None,
        };
        Ok(Self {
            current_folder,
            parent_folder,
        })
    }
}

/// Load a folder that must exist because a row references it.
pub(crate) async fn load_folder(folders: &FolderRepository, pk: i64) -> AppResult<Folder> {
    folders
        .find_by_pk(pk)
        .await?
        .ok_or_else(|| AppError::internal(format!("Folder {pk} vanished while building a view")))
}
