//! Embedded schema migrations.

use tracing::info;

use filehub_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

impl DatabasePool {
    /// Apply every pending migration from the workspace `migrations/` directory.
    pub async fn migrate(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        sqlx::migrate!("../../migrations")
            .run(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to run migrations: {e}"),
                    e,
                )
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }
}
