//! Public link handlers. Reads are anonymous; creating and deleting a
//! link requires the file's owner.

use axum::extract::{Path, State};

use filehub_service::share::{CreatedPublicFile, PublicFileResponse};

use crate::dto::response::{ApiResponse, CurrentFolderResponse, UrlResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

const FILE_NOT_FOUND: &str = "File could not been found.";
const PUBLIC_FILE_NOT_FOUND: &str = "Public file could not been found.";
const PUBLIC_DOWNLOAD_NOT_FOUND: &str = "The public file you are looking for could not be found.";

/// POST /api/files/{id}/public
pub async fn create_public_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
) -> ApiResult<ApiResponse<CreatedPublicFile>> {
    let file_id = parse_id(&file_id, FILE_NOT_FOUND)?;
    let created = state.public_file_service.create(&auth, file_id).await?;
    Ok(ApiResponse::created("Create public file successfully.", created))
}

/// GET /api/public/{id}
pub async fn get_public_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<PublicFileResponse>> {
    let id = parse_id(&id, PUBLIC_FILE_NOT_FOUND)?;
    let file = state.public_file_service.get(id).await?;
    Ok(ApiResponse::ok("Get public file successfully.", file))
}

/// GET /api/public/{id}/download-url
pub async fn public_download_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UrlResponse>> {
    let id = parse_id(&id, PUBLIC_DOWNLOAD_NOT_FOUND)?;
    let url = state.public_file_service.download_url(id).await?;
    Ok(ApiResponse::ok(
        "Get Public file download url successfully.",
        UrlResponse { url },
    ))
}

/// DELETE /api/public/{id}
pub async fn delete_public_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<CurrentFolderResponse>> {
    let id = parse_id(&id, PUBLIC_FILE_NOT_FOUND)?;
    let folder = state.public_file_service.delete(&auth, id).await?;
    Ok(ApiResponse::ok("Delete public file successfully.", folder.into()))
}
