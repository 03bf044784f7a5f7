//! Sharing edge repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_entity::share::{FileSharer, SharedFile, SharedFileRow};

use super::is_unique_violation;

/// Repository for `file_sharers` edges.
#[derive(Debug, Clone)]
pub struct SharerRepository {
    pool: SqlitePool,
}

impl SharerRepository {
    /// Create a new sharer repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Share a file with a user.
    pub async fn add(&self, file_pk: i64, sharer_pk: i64) -> AppResult<FileSharer> {
        sqlx::query_as::<_, FileSharer>(
            "INSERT INTO file_sharers (file_pk, sharer_pk, shared_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(file_pk)
        .bind(sharer_pk)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::field("email", "email is invalid.")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to share file", e)
            }
        })
    }

    /// Whether the file is shared with the user.
    pub async fn exists(&self, file_pk: i64, sharer_pk: i64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM file_sharers WHERE file_pk = ? AND sharer_pk = ?)",
        )
        .bind(file_pk)
        .bind(sharer_pk)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check file sharer", e))
    }

    /// Remove one sharing edge. Returns whether an edge existed.
    pub async fn remove(&self, file_pk: i64, sharer_pk: i64) -> AppResult<bool> {
        sqlx::query("DELETE FROM file_sharers WHERE file_pk = ? AND sharer_pk = ?")
            .bind(file_pk)
            .bind(sharer_pk)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file sharer", e))
    }

    /// Remove the user's own edge to the file with public id `file_id`.
    pub async fn remove_shared_to(&self, sharer_pk: i64, file_id: Uuid) -> AppResult<bool> {
        sqlx::query(
            "DELETE FROM file_sharers WHERE sharer_pk = ? \
             AND file_pk = (SELECT pk FROM files WHERE id = ?)",
        )
        .bind(sharer_pk)
        .bind(file_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete shared file", e))
    }

    /// Files shared with the user, oldest share first.
    pub async fn list_shared_to(&self, sharer_pk: i64) -> AppResult<Vec<SharedFile>> {
        let rows = sqlx::query_as::<_, SharedFileRow>(
            "SELECT s.shared_at, f.id, f.name, f.size, f.mime_type, u.email AS owner_email \
             FROM file_sharers s \
             JOIN files f ON f.pk = s.file_pk \
             JOIN users u ON u.pk = f.owner_pk \
             WHERE s.sharer_pk = ? ORDER BY s.shared_at ASC, f.pk ASC",
        )
        .bind(sharer_pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shared files", e))?;

        Ok(rows.into_iter().map(SharedFile::from).collect())
    }
}
