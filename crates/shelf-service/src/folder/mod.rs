//! Folder operations over the prefix namespace.

pub mod listing;
pub mod service;

pub use listing::FolderListing;
pub use service::{DeletedFolder, FolderService, RenamedFolder};
