//! # filehub-database
//!
//! SQLite connection management, embedded migrations and the repository
//! implementations for every FileHub Drive entity.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
