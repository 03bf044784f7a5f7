//! Route handlers organized by domain.

use filehub_core::error::AppError;

use crate::error::ApiError;

pub mod account;
pub mod file;
pub mod folder;
pub mod health;
pub mod public;
pub mod sharer;
pub mod storage;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("The endpoint you are looking for cannot be found.").into()
}
