//! Sharing edges and public links.

pub mod public;
pub mod sharer;

pub use public::{PublicFile, PublicFileDetails};
pub use sharer::{FileSharer, SharedFile, SharedFileOwner, SharedFileRow, SharedFileSummary};
