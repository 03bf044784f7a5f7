//! File upload, rename, delete and download handlers.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;

use filehub_core::error::AppError;
use filehub_service::file::{FILE_TOO_LARGE, UploadedFile};
use filehub_service::folder::FolderViews;

use crate::dto::request::RenameFileRequest;
use crate::dto::response::{ApiResponse, UrlResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

const FILE_NOT_FOUND: &str = "File could not been found.";
const FOLDER_NOT_FOUND: &str = "Folder could not been found.";
const FILE_REQUIRED: &str = "File is required.";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(FILE_TOO_LARGE)
    } else {
        AppError::bad_request(err.body_text())
    }
}

/// Reads the first part named `file` that carries a file name.
async fn read_file_part(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_string).filter(|n| !n.is_empty()) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(UploadedFile {
            name,
            content_type,
            data,
        });
    }

    Err(AppError::bad_request(FILE_REQUIRED))
}

/// POST /api/folders/{id}/files
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ApiResponse<FolderViews>> {
    let multipart = multipart.map_err(|_| AppError::bad_request(FILE_REQUIRED))?;
    let upload = read_file_part(multipart).await?;
    let folder_id = parse_id(&folder_id, FOLDER_NOT_FOUND)?;

    let views = state.file_service.upload(&auth, folder_id, upload).await?;
    Ok(ApiResponse::created("Upload file is successfully.", views))
}

/// PATCH /api/files/{id}
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameFileRequest>,
) -> ApiResult<ApiResponse<FolderViews>> {
    let id = parse_id(&id, FILE_NOT_FOUND)?;
    let views = state.file_service.rename(&auth, id, &req.name).await?;
    Ok(ApiResponse::ok("Update file successfully.", views))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<FolderViews>> {
    let id = parse_id(&id, FILE_NOT_FOUND)?;
    let views = state.file_service.delete(&auth, id).await?;
    Ok(ApiResponse::ok("Delete file successfully.", views))
}

/// GET /api/files/{id}/download-url
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UrlResponse>> {
    let id = parse_id(&id, FILE_NOT_FOUND)?;
    let url = state.file_service.download_url(&auth, id).await?;
    Ok(ApiResponse::ok("Get file download url successfully.", UrlResponse { url }))
}
