//! File version chains.
//!
//! A new version is an ordinary file row at the same prefix whose
//! metadata records the id of the row it superseded. History is the
//! linked list walked backwards from the requested entry.

use std::collections::HashSet;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use shelf_core::result::AppResult;
use shelf_core::traits::object_key;
use shelf_entity::entry::{NewEntry, StorageEntry, META_PREVIOUS_VERSION};

use super::service::{inherit_extension, ObjectService};

/// Parameters for uploading a new version of an existing file.
#[derive(Debug, Clone)]
pub struct VersionUpload {
    /// New file name; the current name is kept when absent.
    pub file_name: Option<String>,
    /// MIME type of the new content.
    pub mime_type: Option<String>,
    /// New file content.
    pub data: Bytes,
}

impl ObjectService {
    /// Uploads a new version of an existing file.
    ///
    /// The previous row stays untouched; the new row points back at it
    /// and counts against quota like a fresh upload.
    pub async fn upload_version(
        &self,
        user_id: Uuid,
        id: Uuid,
        params: VersionUpload,
    ) -> AppResult<StorageEntry> {
        let current = self.get(user_id, id).await?;
        self.check_size(params.data.len())?;

        let name = match params.file_name.as_deref() {
            Some(name) if !name.is_empty() => inherit_extension(name, &current.name),
            _ => current.name.clone(),
        };

        let size = params.data.len() as i64;
        self.quotas().try_reserve(user_id, size).await?;

        let mut new_entry = NewEntry::file(
            user_id,
            name,
            current.prefix.clone(),
            size,
            params.mime_type.or_else(|| current.mime_type.clone()),
            self.config().bucket.as_str(),
        );
        new_entry.description = current.description.clone();
        new_entry.metadata = Some(serde_json::json!({
            META_PREVIOUS_VERSION: current.id.to_string(),
        }));

        let key = object_key(user_id, new_entry.id);
        if let Err(e) = self.put_blob(&key, params.data).await {
            self.release_quiet(user_id, size).await;
            return Err(e);
        }

        let entry = match self.namespace().insert(&new_entry).await {
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
            previous = %current.id,
            "File version uploaded"
        );
        Ok(entry)
    }

    /// The version history of a file, newest first.
    ///
    /// Walks the `previous_version_id` links starting at the given entry.
    /// Broken links end the walk; a repeated id would mean a cycle, which
    /// the guard set turns into a truncated history instead of a hang.
    pub async fn list_versions(&self, user_id: Uuid, id: Uuid) -> AppResult<Vec<StorageEntry>> {
        let head = self.get(user_id, id).await?;

        let mut seen: HashSet<Uuid> = HashSet::from([head.id]);
        let mut versions = vec![head];

        while let Some(prev_id) = versions
            .last()
            .and_then(StorageEntry::previous_version_id)
        {
            if !seen.insert(prev_id) {
                break;
            }
            match self.namespace().find_file(user_id, prev_id).await? {
                Some(prev) => versions.push(prev),
                None => break,
            }
        }

        Ok(versions)
    }
}
