//! File management: upload, rename, delete and signed downloads.

pub mod service;

pub use service::{FILE_TOO_LARGE, FileService, UploadedFile};
