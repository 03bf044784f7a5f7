//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::view::FolderRef;

/// Name of the per-user root folder.
pub const ROOT_FOLDER_NAME: &str = "My Drive";

/// A folder in a user's drive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Internal key.
    #[serde(skip)]
    pub pk: i64,
    /// Public identifier, also the storage namespace of its files.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Owning user.
    #[serde(skip)]
    pub owner_pk: i64,
    /// Parent folder (null only for the root folder).
    #[serde(skip)]
    pub parent_pk: Option<i64>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is the user's root folder.
    pub fn is_root(&self) -> bool {
        self.parent_pk.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Owning user.
    pub owner_pk: i64,
    /// Parent folder (None for the root).
    pub parent_pk: Option<i64>,
    /// Folder name.
    pub name: String,
}

/// Minimal folder row used for subtree walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct FolderNode {
    /// Internal key.
    pub pk: i64,
    /// Public identifier.
    pub id: Uuid,
    /// Parent key.
    pub parent_pk: Option<i64>,
}

/// One entry of the flat folder listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FolderListItem {
    /// Public identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// Parent folder, null for the root.
    #[sqlx(flatten)]
    #[serde(with = "parent_ref")]
    pub parent: ParentColumns,
}

/// Parent columns from a `LEFT JOIN`, both null for the root.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct ParentColumns {
    /// Parent public id.
    pub parent_id: Option<Uuid>,
    /// Parent name.
    pub parent_name: Option<String>,
}

impl ParentColumns {
    /// Collapse the joined columns into an optional reference.
    pub fn into_ref(self) -> Option<FolderRef> {
        match (self.parent_id, self.parent_name) {
            (Some(id), Some(name)) => Some(FolderRef { id, name }),
            _ => None,
        }
    }
}

mod parent_ref {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{FolderRef, ParentColumns};

    pub fn serialize<S: Serializer>(value: &ParentColumns, serializer: S) -> Result<S::Ok, S::Error> {
        value.clone().into_ref().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ParentColumns, D::Error> {
        let parent = Option::<FolderRef>::deserialize(deserializer)?;
        Ok(match parent {
            Some(FolderRef { id, name }) => ParentColumns {
                parent_id: Some(id),
                parent_name: Some(name),
            },
            None => ParentColumns::default(),
        })
    }
}
