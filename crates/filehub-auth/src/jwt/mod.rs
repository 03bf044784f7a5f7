//! JWT token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{INVALID_TOKEN, JwtDecoder};
pub use encoder::JwtEncoder;
