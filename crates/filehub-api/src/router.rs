//! Route definitions for the FileHub Drive HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! Authentication is enforced per handler by the `AuthUser` extractor, so
//! anonymous routes (health, public links, signed storage reads, account
//! entry points) simply do not ask for it.

use axum::Router;
use axum::routing::{delete, get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router, without middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(account_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(sharing_routes())
        .merge(public_routes())
        .merge(storage_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Liveness and dependency status
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Local accounts
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account/register", post(handlers::account::register))
        .route("/account/login", post(handlers::account::login))
        .route("/account/user", get(handlers::account::current_user))
}

/// Folder CRUD, recursive delete and uploads into a folder
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .patch(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/files", post(handlers::file::upload_file))
}

/// File rename, delete and downloads
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files/{id}",
            patch(handlers::file::rename_file).delete(handlers::file::delete_file),
        )
        .route("/files/{id}/download-url", get(handlers::file::download_url))
}

/// Sharing edges, from both the owner's and the sharee's side
fn sharing_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}/sharers", post(handlers::sharer::create_sharer))
        .route(
            "/files/{id}/sharers/{sharer_id}",
            delete(handlers::sharer::delete_sharer),
        )
        .route("/sharedFiles", get(handlers::sharer::list_shared_files))
        .route(
            "/sharedFiles/{id}",
            delete(handlers::sharer::delete_shared_file),
        )
}

/// Public links
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}/public", post(handlers::public::create_public_file))
        .route(
            "/public/{id}",
            get(handlers::public::get_public_file).delete(handlers::public::delete_public_file),
        )
        .route(
            "/public/{id}/download-url",
            get(handlers::public::public_download_url),
        )
}

/// Signed reads from the local storage backend
fn storage_routes() -> Router<AppState> {
    Router::new().route("/storage/{token}", get(handlers::storage::read_signed))
}
