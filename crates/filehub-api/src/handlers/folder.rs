//! Folder CRUD and recursive delete handlers.

use axum::extract::{Path, State};

use filehub_core::error::AppError;
use filehub_entity::folder::{FolderListItem, FolderView};
use filehub_service::folder::{CreatedFolder, FolderViews};

use crate::dto::request::{CreateFolderRequest, DeleteFolderRequest, RenameFolderRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, ValidatedJson, parse_id};
use crate::state::AppState;

const FOLDER_NOT_FOUND: &str = "Folder could not been found.";
const PARENT_NOT_FOUND: &str = "Parent folder could not been found.";

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiResponse<Vec<FolderListItem>>> {
    let folders = state.folder_service.list_folders(&auth).await?;
    Ok(ApiResponse::ok("Get all folders successfully.", folders))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<FolderView>> {
    let id = parse_id(&id, FOLDER_NOT_FOUND)?;
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(ApiResponse::ok("Get folder successfully.", folder))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<ApiResponse<CreatedFolder>> {
    let parent_id = parse_id(&req.folder_id, PARENT_NOT_FOUND)?;
    let created = state
        .folder_service
        .create_folder(&auth, parent_id, &req.name)
        .await?;
    Ok(ApiResponse::created("Create subfolder successfully.", created))
}

/// PATCH /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameFolderRequest>,
) -> ApiResult<ApiResponse<FolderViews>> {
    let id = parse_id(&id, FOLDER_NOT_FOUND)?;
    let views = state.folder_service.rename_folder(&auth, id, &req.name).await?;
    Ok(ApiResponse::ok("Update folder successfully.", views))
}

/// DELETE /api/folders/{id}
///
/// The optional `folderIds` body guards against deleting a subtree whose
/// files changed since the client last looked at it.
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<DeleteFolderRequest>,
) -> ApiResult<ApiResponse<FolderViews>> {
    let expected = req.string_ids().map_err(AppError::fields)?;
    let id = parse_id(&id, FOLDER_NOT_FOUND)?;

    let deleted = state
        .folder_service
        .delete_folder(&auth, id, expected.as_deref())
        .await?;
    Ok(ApiResponse::ok("Delete folder successfully.", deleted.views))
}
