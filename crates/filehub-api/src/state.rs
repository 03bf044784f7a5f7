//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filehub_auth::jwt::{JwtDecoder, JwtEncoder};
use filehub_auth::password::{PasswordHasher, PasswordValidator};
use filehub_core::config::AppConfig;
use filehub_core::traits::storage::StorageProvider;
use filehub_database::DatabasePool;
use filehub_database::repositories::{
    FileRepository, FolderRepository, PublicFileRepository, SharerRepository, UserRepository,
};
use filehub_service::{AccountService, FileService, FolderService, PublicFileService, SharerService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Object storage backend
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validator used by the auth gate
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Local accounts
    pub account_service: Arc<AccountService>,
    /// Folder CRUD and recursive delete
    pub folder_service: Arc<FolderService>,
    /// File upload, rename, delete and downloads
    pub file_service: Arc<FileService>,
    /// File sharing between users
    pub sharer_service: Arc<SharerService>,
    /// Anonymous public links
    pub public_file_service: Arc<PublicFileService>,
}

impl AppState {
    /// Wires repositories, credentials and services around a database
    /// pool and a storage backend.
    pub fn build(config: Arc<AppConfig>, db: DatabasePool, storage: Arc<dyn StorageProvider>) -> Self {
        let pool = db.pool().clone();

        // ── Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let sharer_repo = Arc::new(SharerRepository::new(pool.clone()));
        let public_repo = Arc::new(PublicFileRepository::new(pool));

        // ── Auth ─────────────────────────────────────────────
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));

        // ── Services ─────────────────────────────────────────
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&user_repo),
            password_hasher,
            password_validator,
            jwt_encoder,
        ));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
            Arc::clone(&storage),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&file_repo),
            Arc::clone(&folder_repo),
            Arc::clone(&storage),
            &config.storage,
        ));
        let sharer_service = Arc::new(SharerService::new(
            sharer_repo,
            Arc::clone(&file_repo),
            Arc::clone(&folder_repo),
            user_repo,
        ));
        let public_file_service = Arc::new(PublicFileService::new(
            public_repo,
            file_repo,
            folder_repo,
            Arc::clone(&storage),
            &config.storage,
        ));

        Self {
            config,
            db,
            storage,
            jwt_decoder,
            account_service,
            folder_service,
            file_service,
            sharer_service,
            public_file_service,
        }
    }
}
