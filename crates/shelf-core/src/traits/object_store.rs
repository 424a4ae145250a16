//! Object store trait for pluggable blob storage backends.
//!
//! The namespace never stores file contents; blobs live in an external
//! store under flat `{user_id}/{entry_id}` keys, with no directory
//! structure of their own. Blob writes and deletes are deliberately not
//! part of any namespace transaction.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for blob storage backends.
///
/// Implementations exist for the local filesystem and for S3-compatible
/// services. The trait is defined here in `shelf-core` and implemented in
/// `shelf-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a complete blob under the given key, replacing any previous
    /// content.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read the blob under the given key as a byte stream.
    async fn get(&self, key: &str) -> AppResult<ByteStream>;

    /// Read the blob under the given key into memory.
    async fn get_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the blob under the given key. Deleting a missing key is not
    /// an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Copy a blob to a new key within the same backend.
    async fn copy(&self, from: &str, to: &str) -> AppResult<()>;

    /// Check whether a blob exists under the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Build the flat blob key for an entry.
///
/// Keys are `{user_id}/{entry_id}` with no further structure.
pub fn object_key(user_id: uuid::Uuid, entry_id: uuid::Uuid) -> String {
    format!("{user_id}/{entry_id}")
}
