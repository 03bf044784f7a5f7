//! Account handlers: register, login and the current user.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use filehub_core::error::AppError;
use filehub_service::user::{AuthSession, Registration};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, ValidatedJson};
use crate::state::AppState;

/// POST /api/account/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<ApiResponse<AuthSession>> {
    req.check().map_err(AppError::fields)?;

    let session = state
        .account_service
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(ApiResponse::created("Register successfully.", session))
}

/// POST /api/account/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthSession>> {
    let session = state.account_service.login(&req.email, &req.password).await?;
    Ok(ApiResponse::ok("Login successfully.", session))
}

/// GET /api/account/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let user = state.account_service.find_user(auth.user_id).await?;
    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        ApiResponse::ok("Get user info successfully.", user.profile()),
    ))
}
