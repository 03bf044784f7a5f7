//! Repository implementations for all FileHub Drive entities.

pub mod file;
pub mod folder;
pub mod public_file;
pub mod sharer;
pub mod user;

pub use file::FileRepository;
pub use folder::{FolderRepository, PurgeCounts};
pub use public_file::PublicFileRepository;
pub use sharer::SharerRepository;
pub use user::UserRepository;

use sqlx::{QueryBuilder, Sqlite};

/// Append `(k1, k2, ...)` to an `IN` clause.
pub(crate) fn push_pk_list(builder: &mut QueryBuilder<'_, Sqlite>, pks: &[i64]) {
    builder.push("(");
    let mut separated = builder.separated(", ");
    for pk in pks {
        separated.push_bind(*pk);
    }
    separated.push_unseparated(")");
}

/// Whether a sqlx error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
