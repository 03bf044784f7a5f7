//! # filehub-core
//!
//! Core crate for FileHub Drive. Contains the configuration schemas, the
//! storage provider trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind, FieldErrors};
pub use result::AppResult;
