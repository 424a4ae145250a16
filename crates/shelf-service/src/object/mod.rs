//! File object operations: upload, download, metadata, move, copy,
//! delete, and version chains.

pub mod service;
pub mod version;

pub use service::{ObjectService, UploadParams};
pub use version::VersionUpload;
