//! # shelf-storage
//!
//! Blob storage providers for Shelf. Blobs are opaque objects under flat
//! `{user_id}/{entry_id}` keys; the directory structure users see lives
//! entirely in the database, so providers never need to model folders.

use std::sync::Arc;

use shelf_core::config::StorageConfig;
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::traits::ObjectStore;

pub mod providers;

pub use providers::local::LocalStore;
pub use providers::s3::S3Store;

/// Build the object store selected by configuration.
pub async fn connect(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "local" => Ok(Arc::new(LocalStore::new(&config.local.root_path).await?)),
        "s3" => Ok(Arc::new(S3Store::new(&config.s3, &config.bucket))),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}' (expected 'local' or 's3')"
        ))),
    }
}
