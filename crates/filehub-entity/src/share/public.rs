//! Anonymous public links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of `public_files`. At most one exists per file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicFile {
    /// Internal key.
    #[serde(skip)]
    pub pk: i64,
    /// Public identifier used in anonymous URLs.
    pub id: Uuid,
    /// The linked file.
    #[serde(skip)]
    pub file_pk: i64,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

/// The file behind a public link, joined for anonymous reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicFileDetails {
    /// Public link id.
    pub id: Uuid,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub object_key: String,
}
