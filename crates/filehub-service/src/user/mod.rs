//! Local accounts.

pub mod account;

pub use account::{AccountService, AuthSession, Registration};
