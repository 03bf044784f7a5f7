//! # filehub-auth
//!
//! Credential handling for FileHub Drive.
//!
//! ## Modules
//!
//! - `jwt`: HS256 bearer token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
