//! # filehub-api
//!
//! HTTP API layer for FileHub Drive built on Axum.
//!
//! Provides the REST endpoints, the bearer-token auth gate, JSON body
//! extraction with validation, the response envelope and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
