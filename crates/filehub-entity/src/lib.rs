//! # filehub-entity
//!
//! Domain entity models for FileHub Drive. Every struct in this crate
//! represents a database table row or a value object returned to clients.
//! Database entities derive `sqlx::FromRow`; internal integer keys are
//! never serialized, clients only ever see public UUIDs.

pub mod file;
pub mod folder;
pub mod share;
pub mod user;
