//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, validates it and resolves the user it names.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use filehub_core::error::AppError;
use filehub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

const MISSING_HEADER: &str = "Authorization header is required.";
const INVALID_SCHEME: &str = "The auth-scheme or token are invalid.";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Splits `Bearer <token>` into its token, rejecting other schemes.
fn bearer_token(header: &str) -> Result<&str, AppError> {
    let (scheme, token) = header.trim().split_once(' ').unwrap_or((header.trim(), ""));
    let token = token.trim();
    if scheme != "Bearer" || token.is_empty() {
        return Err(AppError::bad_request(INVALID_SCHEME));
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::bad_request(MISSING_HEADER))?
            .to_str()
            .map_err(|_| AppError::bad_request(INVALID_SCHEME))?;

        let token = bearer_token(header)?;
        let claims = state.jwt_decoder.decode(token)?;
        let user = state.account_service.find_user(claims.user_id()).await?;

        Ok(AuthUser(RequestContext::from(&user)))
    }
}
