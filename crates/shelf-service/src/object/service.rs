//! File object lifecycle.
//!
//! Blob writes are never part of a namespace transaction. Upload writes
//! the blob first and inserts the row second; delete removes the row
//! first and the blob second. Either order leaves at worst an orphaned
//! blob, never a row without content, and every orphan is logged.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use shelf_core::config::StorageConfig;
use shelf_core::error::AppError;
use shelf_core::path::normalize_prefix;
use shelf_core::result::AppResult;
use shelf_core::traits::{object_key, ByteStream, ObjectStore};
use shelf_database::repositories::QuotaRepository;
use shelf_database::NamespaceStore;
use shelf_entity::entry::{extension_of, NewEntry, StorageEntry};

/// Parameters for a simple (single request) upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Raw containing prefix; normalized before use.
    pub prefix: String,
    /// File name.
    pub file_name: String,
    /// MIME type as reported by the client.
    pub mime_type: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// Manages file objects: namespace rows plus their blobs and quota.
#[derive(Clone)]
pub struct ObjectService {
    /// The namespace store.
    namespace: Arc<dyn NamespaceStore>,
    /// The blob store.
    blobs: Arc<dyn ObjectStore>,
    /// Quota accounting.
    quotas: Arc<QuotaRepository>,
    /// Storage configuration.
    config: StorageConfig,
}

impl std::fmt::Debug for ObjectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectService").finish()
    }
}

impl ObjectService {
    /// Creates a new object service.
    pub fn new(
        namespace: Arc<dyn NamespaceStore>,
        blobs: Arc<dyn ObjectStore>,
        quotas: Arc<QuotaRepository>,
        config: StorageConfig,
    ) -> Self {
        Self {
            namespace,
            blobs,
            quotas,
            config,
        }
    }

    pub(crate) fn namespace(&self) -> &Arc<dyn NamespaceStore> {
        &self.namespace
    }

    pub(crate) fn quotas(&self) -> &Arc<QuotaRepository> {
        &self.quotas
    }

    pub(crate) fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Uploads a file under the given prefix.
    pub async fn upload(&self, user_id: Uuid, params: UploadParams) -> AppResult<StorageEntry> {
        validate_file_name(&params.file_name)?;
        self.check_size(params.data.len())?;

        let prefix = normalize_prefix(&params.prefix);
        let size = params.data.len() as i64;
        self.quotas.try_reserve(user_id, size).await?;

        let mut new_entry = NewEntry::file(
            user_id,
            params.file_name,
            prefix,
            size,
            params.mime_type,
            self.config.bucket.as_str(),
        );
        new_entry.description = params.description;

        let key = object_key(user_id, new_entry.id);
        if let Err(e) = self.blobs.put(&key, params.data).await {
            self.release_quiet(user_id, size).await;
            return Err(e);
        }

        let entry = match self.namespace.insert(&new_entry).await {
            Ok(entry) => entry,
            Err(e) => {
                self.delete_blob_quiet(&key).await;
                self.release_quiet(user_id, size).await;
                return Err(e);
            }
        };

        info!(
            user_id = %user_id,
            entry_id = %entry.id,
            prefix = %entry.prefix,
            size = entry.size,
            "File uploaded"
        );
        Ok(entry)
    }

    /// Fetches a file row by id.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> AppResult<StorageEntry> {
        self.namespace
            .find_file(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Opens the content stream for an already-resolved file row.
    ///
    /// Used by the share and link paths, which resolve entries across
    /// tenant scopes before streaming.
    pub async fn open_stream(&self, entry: &StorageEntry) -> AppResult<ByteStream> {
        self.blobs.get(&object_key(entry.user_id, entry.id)).await
    }

    /// Updates a file's display name and description.
    ///
    /// A new name without an extension inherits the old one, so renaming
    /// `report.pdf` to `summary` yields `summary.pdf`.
    pub async fn update_metadata(
        &self,
        user_id: Uuid,
        id: Uuid,
        new_name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<StorageEntry> {
        let entry = self.get(user_id, id).await?;

        let name = match new_name {
            Some(name) => {
                validate_file_name(name)?;
                inherit_extension(name, &entry.name)
            }
            None => entry.name.clone(),
        };

        let updated = self
            .namespace
            .update_file_metadata(user_id, id, &name, description)
            .await?;

        info!(user_id = %user_id, entry_id = %id, name = %updated.name, "File metadata updated");
        Ok(updated)
    }

    /// Moves a file to a new containing prefix.
    pub async fn move_file(
        &self,
        user_id: Uuid,
        id: Uuid,
        raw_new_prefix: &str,
    ) -> AppResult<StorageEntry> {
        let new_prefix = normalize_prefix(raw_new_prefix);
        let moved = self
            .namespace
            .update_file_prefix(user_id, id, &new_prefix)
            .await?;

        info!(user_id = %user_id, entry_id = %id, prefix = %moved.prefix, "File moved");
        Ok(moved)
    }

    /// Copies a file, optionally into a different prefix.
    ///
    /// The copy is a new entry with a new blob; it counts against quota
    /// like a fresh upload.
    pub async fn copy(
        &self,
        user_id: Uuid,
        id: Uuid,
        raw_dest_prefix: Option<&str>,
    ) -> AppResult<StorageEntry> {
        let source = self.get(user_id, id).await?;
        let dest_prefix = match raw_dest_prefix {
            Some(raw) => normalize_prefix(raw),
            None => source.prefix.clone(),
        };

        self.quotas.try_reserve(user_id, source.size).await?;

        let mut new_entry = NewEntry::file(
            user_id,
            source.name.clone(),
            dest_prefix,
            source.size,
            source.mime_type.clone(),
            self.config.bucket.as_str(),
        );
        new_entry.description = source.description.clone();

        let from_key = object_key(user_id, source.id);
        let to_key = object_key(user_id, new_entry.id);
        if let Err(e) = self.blobs.copy(&from_key, &to_key).await {
            self.release_quiet(user_id, source.size).await;
            return Err(e);
        }

        let entry = match self.namespace.insert(&new_entry).await {
            Ok(entry) => entry,
            Err(e) => {
                self.delete_blob_quiet(&to_key).await;
                self.release_quiet(user_id, source.size).await;
                return Err(e);
            }
        };

        info!(
            user_id = %user_id,
            source_id = %source.id,
            entry_id = %entry.id,
            prefix = %entry.prefix,
            "File copied"
        );
        Ok(entry)
    }

    /// Deletes a file row, credits its bytes back, and removes its blob.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<StorageEntry> {
        let removed = self
            .namespace
            .delete_file(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.release_quiet(user_id, removed.size).await;
        self.delete_blob_quiet(&object_key(user_id, removed.id)).await;

        info!(user_id = %user_id, entry_id = %id, "File deleted");
        Ok(removed)
    }

    /// Cleans up after a folder deletion: credits the removed files'
    /// bytes back and removes their blobs best-effort.
    pub async fn reclaim(&self, user_id: Uuid, removed: &[StorageEntry]) {
        let files: Vec<&StorageEntry> = removed.iter().filter(|e| e.is_file()).collect();
        let bytes: i64 = files.iter().map(|e| e.size).sum();

        if bytes > 0 {
            self.release_quiet(user_id, bytes).await;
        }
        for file in &files {
            self.delete_blob_quiet(&object_key(user_id, file.id)).await;
        }

        if !files.is_empty() {
            info!(
                user_id = %user_id,
                files = files.len(),
                bytes,
                "Reclaimed storage after folder deletion"
            );
        }
    }

    /// Removes every blob a user owns. Runs before account deletion;
    /// the rows themselves go with the user via cascades.
    pub async fn purge_user(&self, user_id: Uuid) -> AppResult<()> {
        let files = self.namespace.list_user_files(user_id).await?;
        for file in &files {
            self.delete_blob_quiet(&object_key(user_id, file.id)).await;
        }

        info!(user_id = %user_id, files = files.len(), "User blobs purged");
        Ok(())
    }

    pub(crate) fn check_size(&self, len: usize) -> AppResult<()> {
        if len as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }
        Ok(())
    }

    pub(crate) async fn release_quiet(&self, user_id: Uuid, bytes: i64) {
        if let Err(e) = self.quotas.release(user_id, bytes).await {
            warn!(user_id = %user_id, bytes, error = %e, "Failed to release reserved quota");
        }
    }

    pub(crate) async fn delete_blob_quiet(&self, key: &str) {
        if let Err(e) = self.blobs.delete(key).await {
            warn!(key, error = %e, "Failed to delete blob; requires reconciliation");
        }
    }

    pub(crate) async fn put_blob(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.blobs.put(key, data).await
    }
}

/// Reject file names that are empty or contain a path separator.
fn validate_file_name(name: &str) -> AppResult<()> {
    if name.is_empty() || name.contains('/') {
        return Err(AppError::validation(format!(
            "'{name}' is not a valid file name"
        )));
    }
    Ok(())
}

/// Carry the old extension over when the new name has none.
pub(crate) fn inherit_extension(new_name: &str, old_name: &str) -> String {
    if extension_of(new_name).is_none() {
        if let Some(ext) = extension_of(old_name) {
            return format!("{new_name}.{ext}");
        }
    }
    new_name.to_string()
}
