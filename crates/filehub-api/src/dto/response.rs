//! Response DTOs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use filehub_entity::folder::FolderView;

/// Success envelope: `{ success: true, message?, data? }`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 response with a message and data.
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// A 201 response with a message and data.
    pub fn created(message: &str, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(message, data)
        }
    }

    /// A 200 response with data only.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            status: StatusCode::OK,
        }
    }
}

impl ApiResponse<()> {
    /// A 200 response with a message only.
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
            status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// `{ url }` payload of download endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

/// `{ currentFolder }` payload of sharing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentFolderResponse {
    pub current_folder: FolderView,
}

impl From<FolderView> for CurrentFolderResponse {
    fn from(current_folder: FolderView) -> Self {
        Self { current_folder }
    }
}

/// Health report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every dependency is reachable, `"degraded"` otherwise.
    pub status: String,
    pub database: String,
    pub storage: String,
}
