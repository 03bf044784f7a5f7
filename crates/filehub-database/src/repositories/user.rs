//! User repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_entity::folder::{Folder, ROOT_FOLDER_NAME};
use filehub_entity::user::{CreateUser, User};

use super::is_unique_violation;

pub const USERNAME_TAKEN: &str = "Username is been used.";
pub const EMAIL_TAKEN: &str = "The email is been used.";

/// Maps a unique violation on `users` to the field it names.
fn taken_field(err: &sqlx::Error) -> Option<AppError> {
    if !is_unique_violation(err) {
        return None;
    }
    let message = err.as_database_error()?.message();
    if message.contains("users.username") {
        Some(AppError::field("username", USERNAME_TAKEN))
    } else if message.contains("users.email") {
        Some(AppError::field("email", EMAIL_TAKEN))
    } else {
        None
    }
}

/// Repository for user lookup and registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by public id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER(?)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER(?)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Insert a user together with its "My Drive" root folder.
    pub async fn create_with_root(&self, data: CreateUser) -> AppResult<(User, Folder)> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, username, password_hash, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            taken_field(&e)
                .unwrap_or_else(|| AppError::with_source(ErrorKind::Database, "Failed to create user", e))
        })?;

        let root = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, owner_pk, parent_pk, created_at, updated_at) \
             VALUES (?, ?, ?, NULL, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(ROOT_FOLDER_NAME)
        .bind(user.pk)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create root folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok((user, root))
    }
}
