//! # filehub-storage
//!
//! Storage provider implementations for FileHub Drive. Supports the local
//! filesystem and S3-compatible object stores.

pub mod manager;
pub mod providers;

pub use manager::build_provider;
