//! Handlers for sharing files with other users.

use axum::extract::{Path, State};

use filehub_entity::share::SharedFile;
use filehub_service::share::CreatedShare;

use crate::dto::request::ShareFileRequest;
use crate::dto::response::{ApiResponse, CurrentFolderResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

const FILE_NOT_FOUND: &str = "File could not been found.";
const SHARER_NOT_FOUND: &str = "Sharer could not been found.";
const SHARED_FILE_NOT_FOUND: &str = "Shared file could not been found.";

/// GET /api/sharedFiles
pub async fn list_shared_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiResponse<Vec<SharedFile>>> {
    let shared = state.sharer_service.list_shared(&auth).await?;
    Ok(ApiResponse::ok("Get shared files successfully.", shared))
}

/// POST /api/files/{id}/sharers
pub async fn create_sharer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ShareFileRequest>,
) -> ApiResult<ApiResponse<CreatedShare>> {
    let file_id = parse_id(&file_id, FILE_NOT_FOUND)?;
    let created = state.sharer_service.share(&auth, file_id, &req.email).await?;
    Ok(ApiResponse::created("Create file sharer successfully.", created))
}

/// DELETE /api/files/{id}/sharers/{sharerId}
pub async fn delete_sharer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((file_id, sharer_id)): Path<(String, String)>,
) -> ApiResult<ApiResponse<CurrentFolderResponse>> {
    let file_id = parse_id(&file_id, FILE_NOT_FOUND)?;
    let sharer_id = parse_id(&sharer_id, SHARER_NOT_FOUND)?;

    let folder = state
        .sharer_service
        .unshare(&auth, file_id, sharer_id)
        .await?;
    Ok(ApiResponse::ok("Delete file sharer successfully.", folder.into()))
}

/// DELETE /api/sharedFiles/{id}
///
/// A sharee removing a file from their own shared list.
pub async fn delete_shared_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let file_id = parse_id(&file_id, SHARED_FILE_NOT_FOUND)?;
    state.sharer_service.leave(&auth, file_id).await?;
    Ok(ApiResponse::message("Delete shared file successfully."))
}
