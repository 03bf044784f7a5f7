//! Typed path parameter helpers.

use uuid::Uuid;

use filehub_core::error::AppError;

/// Parses a UUID from a path segment.
///
/// Ids that cannot exist are reported like missing rows, with the
/// route's own not-found message.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::not_found(not_found))
}
