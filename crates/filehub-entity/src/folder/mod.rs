//! Folder domain entities.

pub mod model;
pub mod view;

pub use model::{
    CreateFolder, Folder, FolderListItem, FolderNode, ParentColumns, ROOT_FOLDER_NAME,
};
pub use view::{
    FileSharerEntry, FileSummary, FolderCounts, FolderRef, FolderView, PublicRef, SharerRef,
    SubfolderSummary,
};
