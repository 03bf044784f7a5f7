//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filehub_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the auth gate and passed into service methods so that every
/// operation is scoped to the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Internal key of the authenticated user, used for ownership filters.
    pub user_pk: i64,
    /// Public id of the authenticated user.
    pub user_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_pk: i64, user_id: Uuid) -> Self {
        Self {
            user_pk,
            user_id,
            request_time: Utc::now(),
        }
    }
}

impl From<&User> for RequestContext {
    fn from(user: &User) -> Self {
        Self::new(user.pk, user.id)
    }
}
