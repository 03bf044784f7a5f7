//! Result alias used by every FileHub crate.

use crate::error::AppError;

/// A `Result` whose error side is always [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
