//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Builds a compression layer. Only the gzip codec is compiled in.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new()
}
