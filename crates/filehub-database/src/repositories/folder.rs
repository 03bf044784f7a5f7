//! Folder repository implementation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_entity::folder::{
    CreateFolder, FileSharerEntry, FileSummary, Folder, FolderCounts, FolderListItem, FolderNode,
    FolderRef, FolderView, PublicRef, SharerRef, SubfolderSummary,
};

use super::push_pk_list;

/// Rows removed by a subtree purge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeCounts {
    pub folders: u64,
    pub files: u64,
    pub sharers: u64,
    pub public_files: u64,
}

#[derive(FromRow)]
struct SubfolderRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    subfolder_count: i64,
    file_count: i64,
}

#[derive(FromRow)]
struct FileRow {
    pk: i64,
    id: Uuid,
    name: String,
    size: i64,
    mime_type: String,
    created_at: DateTime<Utc>,
    public_id: Option<Uuid>,
}

#[derive(FromRow)]
struct SharerRow {
    file_pk: i64,
    id: Uuid,
    email: String,
}

/// Repository for folder CRUD, views and subtree removal.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by public id, scoped to its owner.
    pub async fn find_owned(&self, owner_pk: i64, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE owner_pk = ? AND id = ?")
            .bind(owner_pk)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a folder by internal key.
    pub async fn find_by_pk(&self, pk: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE pk = ?")
            .bind(pk)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List every folder of an owner with its parent reference.
    pub async fn list_for_owner(&self, owner_pk: i64) -> AppResult<Vec<FolderListItem>> {
        sqlx::query_as::<_, FolderListItem>(
            "SELECT f.id, f.name, f.created_at, p.id AS parent_id, p.name AS parent_name \
             FROM folders f LEFT JOIN folders p ON p.pk = f.parent_pk \
             WHERE f.owner_pk = ? ORDER BY f.pk ASC",
        )
        .bind(owner_pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, owner_pk, parent_pk, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.owner_pk)
        .bind(data.parent_pk)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    /// Rename a folder.
    pub async fn rename(&self, pk: i64, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = ?, updated_at = ? WHERE pk = ? RETURNING *",
        )
        .bind(name)
        .bind(Utc::now())
        .bind(pk)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found("Folder could not been found."))
    }

    /// Build the view of a folder: its parent, direct subfolders and files.
    pub async fn view(&self, folder: &Folder) -> AppResult<FolderView> {
        let parent = match folder.parent_pk {
            Some(parent_pk) => sqlx::query_as::<_, (Uuid, String)>(
                "SELECT id, name FROM folders WHERE pk = ?",
            )
            .bind(parent_pk)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load parent folder", e)
            })?
            .map(|(id, name)| FolderRef { id, name }),
            None => None,
        };

        let subfolders = sqlx::query_as::<_, SubfolderRow>(
            "SELECT f.id, f.name, f.created_at, \
                (SELECT COUNT(*) FROM folders c WHERE c.parent_pk = f.pk) AS subfolder_count, \
                (SELECT COUNT(*) FROM files x WHERE x.folder_pk = f.pk) AS file_count \
             FROM folders f WHERE f.parent_pk = ? ORDER BY f.pk ASC",
        )
        .bind(folder.pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load subfolders", e))?
        .into_iter()
        .map(|row| SubfolderSummary {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            count: FolderCounts {
                subfolders: row.subfolder_count,
                files: row.file_count,
            },
        })
        .collect();

        let file_rows = sqlx::query_as::<_, FileRow>(
            "SELECT fi.pk, fi.id, fi.name, fi.size, fi.mime_type, fi.created_at, p.id AS public_id \
             FROM files fi LEFT JOIN public_files p ON p.file_pk = fi.pk \
             WHERE fi.folder_pk = ? ORDER BY fi.pk ASC",
        )
        .bind(folder.pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load files", e))?;

        let sharer_rows = sqlx::query_as::<_, SharerRow>(
            "SELECT s.file_pk, u.id, u.email FROM file_sharers s \
             JOIN users u ON u.pk = s.sharer_pk \
             JOIN files fi ON fi.pk = s.file_pk \
             WHERE fi.folder_pk = ? ORDER BY s.shared_at ASC, u.pk ASC",
        )
        .bind(folder.pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load sharers", e))?;

        let mut sharers: HashMap<i64, Vec<FileSharerEntry>> = HashMap::new();
        for row in sharer_rows {
            sharers.entry(row.file_pk).or_default().push(FileSharerEntry {
                sharer: SharerRef {
                    id: row.id,
                    email: row.email,
                },
            });
        }

        let files = file_rows
            .into_iter()
            .map(|row| FileSummary {
                id: row.id,
                name: row.name,
                size: row.size,
                mime_type: row.mime_type,
                created_at: row.created_at,
                sharers: sharers.remove(&row.pk).unwrap_or_default(),
                public: row.public_id.map(|id| PublicRef { id }),
            })
            .collect();

        Ok(FolderView {
            id: folder.id,
            name: folder.name.clone(),
            parent,
            subfolders,
            files,
        })
    }

    /// Load the whole folder forest of an owner as `(pk, id, parent_pk)`.
    pub async fn list_nodes(&self, owner_pk: i64) -> AppResult<Vec<FolderNode>> {
        sqlx::query_as::<_, FolderNode>(
            "SELECT pk, id, parent_pk FROM folders WHERE owner_pk = ? ORDER BY pk ASC",
        )
        .bind(owner_pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load folder tree", e))
    }

    /// Keys of an owner's folders that hold at least one file.
    pub async fn folders_with_files(&self, owner_pk: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT folder_pk FROM files WHERE owner_pk = ? ORDER BY folder_pk ASC",
        )
        .bind(owner_pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load non-empty folders", e)
        })
    }

    /// Remove a collected subtree in one transaction.
    ///
    /// `folder_pks` must be ordered deepest first so that no folder is
    /// deleted while a child still references it. Public links and sharing
    /// edges of `file_pks` go before the files themselves.
    pub async fn purge_subtree(&self, folder_pks: &[i64], file_pks: &[i64]) -> AppResult<PurgeCounts> {
        let mut counts = PurgeCounts::default();
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if !file_pks.is_empty() {
            counts.public_files = delete_in(&mut tx, "DELETE FROM public_files WHERE file_pk IN ", file_pks)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete public files", e)
                })?;
            counts.sharers = delete_in(&mut tx, "DELETE FROM file_sharers WHERE file_pk IN ", file_pks)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete file sharers", e)
                })?;
            counts.files = delete_in(&mut tx, "DELETE FROM files WHERE pk IN ", file_pks)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;
        }

        for pk in folder_pks {
            counts.folders += sqlx::query("DELETE FROM folders WHERE pk = ?")
                .bind(pk)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?
                .rows_affected();
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(counts)
    }
}

async fn delete_in(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    statement: &str,
    pks: &[i64],
) -> Result<u64, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(statement);
    push_pk_list(&mut builder, pks);
    Ok(builder.build().execute(&mut **tx).await?.rows_affected())
}
