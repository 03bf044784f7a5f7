//! JWT claims carried by bearer tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload of a bearer token.
///
/// Tokens minted by the external identity provider carry the same shape,
/// so only `sub` and `exp` are relied upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user's public id.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
