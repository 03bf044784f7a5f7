//! File repository implementation.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_entity::file::{CreateFile, File};

use super::push_pk_list;

/// Repository for file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new file record.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let now = Utc::now();
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, size, mime_type, object_key, owner_pk, folder_pk, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.size)
        .bind(&data.mime_type)
        .bind(&data.object_key)
        .bind(data.owner_pk)
        .bind(data.folder_pk)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Find a file by internal key.
    pub async fn find_by_pk(&self, pk: i64) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE pk = ?")
            .bind(pk)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Find a file by public id, scoped to its owner.
    pub async fn find_owned(&self, owner_pk: i64, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE owner_pk = ? AND id = ?")
            .bind(owner_pk)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Find a file the user owns or that is shared with them.
    pub async fn find_accessible(&self, user_pk: i64, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files f WHERE f.id = ? AND (f.owner_pk = ? OR EXISTS ( \
                SELECT 1 FROM file_sharers s WHERE s.file_pk = f.pk AND s.sharer_pk = ?))",
        )
        .bind(id)
        .bind(user_pk)
        .bind(user_pk)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Keys of every file held by the given folders.
    pub async fn pks_in_folders(&self, folder_pks: &[i64]) -> AppResult<Vec<i64>> {
        if folder_pks.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT pk FROM files WHERE folder_pk IN ");
        push_pk_list(&mut builder, folder_pks);
        builder.push(" ORDER BY pk ASC");
        builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to collect files", e))
    }

    /// Rename a file.
    pub async fn rename(&self, pk: i64, name: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>("UPDATE files SET name = ?, updated_at = ? WHERE pk = ? RETURNING *")
            .bind(name)
            .bind(Utc::now())
            .bind(pk)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?
            .ok_or_else(|| AppError::not_found("File could not been found."))
    }

    /// Delete a file with its public link and sharing edges in one transaction.
    pub async fn delete_with_links(&self, pk: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for statement in [
            "DELETE FROM public_files WHERE file_pk = ?",
            "DELETE FROM file_sharers WHERE file_pk = ?",
            "DELETE FROM files WHERE pk = ?",
        ] {
            sqlx::query(statement)
                .bind(pk)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
