//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user of the drive.
///
/// Users registered through an external identity provider have no
/// password hash; their bearer tokens are minted elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal key.
    #[serde(skip)]
    pub pk: i64,
    /// Public identifier, the `sub` claim of bearer tokens.
    pub id: Uuid,
    /// Lowercased email address.
    pub email: String,
    /// Optional unique login name.
    pub username: Option<String>,
    /// Argon2 password hash for local accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The public profile of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Public identifier.
    pub id: Uuid,
    /// Login name, if any.
    pub username: Option<String>,
    /// Email address.
    pub email: String,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Lowercased email address.
    pub email: String,
    /// Optional login name.
    pub username: Option<String>,
    /// Pre-hashed password, `None` for identity-provider accounts.
    pub password_hash: Option<String>,
}
