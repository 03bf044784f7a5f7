//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file stored in a user's drive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Internal key.
    #[serde(skip)]
    pub pk: i64,
    /// Public identifier.
    pub id: Uuid,
    /// The file name (including extension).
    pub name: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME type of the file.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// The object key within the storage provider.
    #[serde(skip)]
    pub object_key: String,
    /// The file owner.
    #[serde(skip)]
    pub owner_pk: i64,
    /// The folder containing this file.
    #[serde(skip)]
    pub folder_pk: i64,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last renamed.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Build the storage key for a file placed in `folder_id`.
    pub fn object_key_for(folder_id: Uuid, file_id: Uuid) -> String {
        format!("{folder_id}/{file_id}")
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Public identifier, chosen before upload so the object key is known.
    pub id: Uuid,
    /// The file name.
    pub name: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME type.
    pub mime_type: String,
    /// The object key within the storage provider.
    pub object_key: String,
    /// The file owner.
    pub owner_pk: i64,
    /// The folder to place the file in.
    pub folder_pk: i64,
}
