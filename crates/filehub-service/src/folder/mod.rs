//! Folder management and the recursive delete engine.

pub mod service;
pub mod tree;
pub mod views;

pub use service::{CreatedFolder, DeletedFolder, FolderService};
pub use views::FolderViews;
