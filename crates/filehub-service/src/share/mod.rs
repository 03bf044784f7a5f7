//! Sharing files with users and through anonymous public links.

pub mod public;
pub mod sharer;

pub use public::{CreatedPublicFile, PublicFileResponse, PublicFileService};
pub use sharer::{CreatedShare, SharerService};
