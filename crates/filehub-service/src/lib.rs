//! # filehub-service
//!
//! Business logic service layer for FileHub Drive. Each service
//! orchestrates repositories, the storage provider and credentials to
//! implement one family of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod share;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::{FileService, UploadedFile};
pub use folder::{FolderService, FolderViews};
pub use share::{PublicFileService, SharerService};
pub use user::AccountService;
