//! Axum middleware stack.

pub mod compression;
pub mod cors;
pub mod logging;

pub use compression::build_compression_layer;
pub use cors::build_cors_layer;
pub use logging::request_logging;
