//! Folder view value objects.
//!
//! A [`FolderView`] is the snapshot of one folder that every mutating
//! endpoint returns so the client can redraw without a second request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A `{id, name}` reference to a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    /// Public identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}

/// A folder together with its direct children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderView {
    /// Public identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder, null for the root.
    pub parent: Option<FolderRef>,
    /// Direct subfolders ordered by creation.
    pub subfolders: Vec<SubfolderSummary>,
    /// Direct files ordered by creation.
    pub files: Vec<FileSummary>,
}

/// A direct subfolder inside a [`FolderView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubfolderSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_count")]
    pub count: FolderCounts,
}

/// Number of direct children of a subfolder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCounts {
    pub subfolders: i64,
    pub files: i64,
}

/// A file inside a [`FolderView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    /// Users the file is shared with.
    pub sharers: Vec<FileSharerEntry>,
    /// Public link, if one exists.
    pub public: Option<PublicRef>,
}

/// One sharing edge of a file, as shown to the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSharerEntry {
    pub sharer: SharerRef,
}

/// The user a file is shared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharerRef {
    pub id: Uuid,
    pub email: String,
}

/// Reference to a public link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicRef {
    pub id: Uuid,
}
