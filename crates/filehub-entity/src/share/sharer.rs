//! Sharing edges between a file and the users it is shared with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of `file_sharers`.
///
/// The sharee is never the owner of the file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileSharer {
    /// The shared file.
    pub file_pk: i64,
    /// The user the file is shared with.
    pub sharer_pk: i64,
    /// When the edge was created.
    pub shared_at: DateTime<Utc>,
}

/// A file shared to the caller, as listed under `/sharedFiles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedFile {
    pub shared_at: DateTime<Utc>,
    pub file: SharedFileSummary,
}

/// The file half of a [`SharedFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFileSummary {
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub owner: SharedFileOwner,
}

/// Owner of a shared file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFileOwner {
    pub email: String,
}

/// Flat row backing [`SharedFile`].
#[derive(Debug, Clone, FromRow)]
pub struct SharedFileRow {
    pub shared_at: DateTime<Utc>,
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    pub mime_type: String,
    pub owner_email: String,
}

impl From<SharedFileRow> for SharedFile {
    fn from(row: SharedFileRow) -> Self {
        Self {
            shared_at: row.shared_at,
            file: SharedFileSummary {
                id: row.id,
                name: row.name,
                size: row.size,
                mime_type: row.mime_type,
                owner: SharedFileOwner {
                    email: row.owner_email,
                },
            },
        }
    }
}
