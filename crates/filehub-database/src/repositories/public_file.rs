//! Public link repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_entity::share::{PublicFile, PublicFileDetails};

use super::is_unique_violation;

/// Repository for anonymous public links.
#[derive(Debug, Clone)]
pub struct PublicFileRepository {
    pool: SqlitePool,
}

impl PublicFileRepository {
    /// Create a new public file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the public link of a file.
    pub async fn create(&self, file_pk: i64) -> AppResult<PublicFile> {
        sqlx::query_as::<_, PublicFile>(
            "INSERT INTO public_files (id, file_pk, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(file_pk)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Public file already exists.")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create public file", e)
            }
        })
    }

    /// Resolve a public link to the file it exposes.
    pub async fn find_details(&self, id: Uuid) -> AppResult<Option<PublicFileDetails>> {
        sqlx::query_as::<_, PublicFileDetails>(
            "SELECT p.id, f.name, f.size, f.mime_type, p.created_at, f.object_key \
             FROM public_files p JOIN files f ON f.pk = p.file_pk WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find public file", e))
    }

    /// Find a public link whose file belongs to `owner_pk`.
    pub async fn find_owned(&self, owner_pk: i64, id: Uuid) -> AppResult<Option<PublicFile>> {
        sqlx::query_as::<_, PublicFile>(
            "SELECT p.* FROM public_files p JOIN files f ON f.pk = p.file_pk \
             WHERE p.id = ? AND f.owner_pk = ?",
        )
        .bind(id)
        .bind(owner_pk)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find public file", e))
    }

    /// Delete a public link.
    pub async fn delete(&self, pk: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM public_files WHERE pk = ?")
            .bind(pk)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete public file", e))
    }
}
