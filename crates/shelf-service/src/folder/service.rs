//! Folder create / rename / delete / list over the namespace store.
//!
//! Folders are rows, not containers: hierarchy lives in the normalized
//! prefix strings, and every operation here is a prefix computation
//! followed by one atomic namespace call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::path::{leaf_name, normalize_prefix, replace_leaf};
use shelf_core::result::AppResult;
use shelf_database::NamespaceStore;
use shelf_entity::entry::{NewEntry, StorageEntry};

use super::listing::{assemble, FolderListing};

/// Outcome of a folder rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamedFolder {
    /// The folder's new name.
    pub new_name: String,
    /// The folder's new normalized prefix.
    pub new_prefix: String,
    /// Number of rows whose prefix was rewritten.
    pub renamed: u64,
}

/// Outcome of a folder deletion.
#[derive(Debug, Clone)]
pub struct DeletedFolder {
    /// Number of rows removed.
    pub count: u64,
    /// The removed rows, for blob cleanup and quota crediting.
    pub removed: Vec<StorageEntry>,
}

/// Manages folder operations for the virtual filesystem.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// The namespace store.
    namespace: Arc<dyn NamespaceStore>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(namespace: Arc<dyn NamespaceStore>) -> Self {
        Self { namespace }
    }

    /// Creates a folder at the given raw prefix.
    pub async fn create(&self, user_id: Uuid, raw_prefix: &str) -> AppResult<StorageEntry> {
        let prefix = normalize_prefix(raw_prefix);
        let name = leaf_name(&prefix).ok_or_else(|| {
            AppError::invalid_path(format!("'{raw_prefix}' does not name a folder"))
        })?;

        if self.namespace.exists_at(user_id, &prefix).await? {
            return Err(AppError::conflict(format!(
                "An entry already exists at '{prefix}'"
            )));
        }
        if self.namespace.exists_under(user_id, &prefix).await? {
            return Err(AppError::conflict(format!(
                "'{prefix}' already contains deeper entries"
            )));
        }

        let entry = self
            .namespace
            .insert(&NewEntry::folder(user_id, name, prefix.as_str()))
            .await?;

        info!(user_id = %user_id, prefix = %entry.prefix, "Folder created");
        Ok(entry)
    }

    /// Renames the folder at the given raw prefix, rewriting every
    /// descendant row's prefix.
    ///
    /// Renaming a prefix nothing lives under rewrites zero rows and still
    /// succeeds; the caller learns the difference from `renamed`.
    pub async fn rename(
        &self,
        user_id: Uuid,
        raw_prefix: &str,
        new_name: &str,
    ) -> AppResult<RenamedFolder> {
        if new_name.is_empty() || new_name.contains('/') {
            return Err(AppError::invalid_path(format!(
                "'{new_name}' is not a valid folder name"
            )));
        }

        let old_prefix = normalize_prefix(raw_prefix);
        if leaf_name(&old_prefix).is_none() {
            return Err(AppError::invalid_path(format!(
                "'{raw_prefix}' does not name a folder"
            )));
        }
        // The leaf exists, so replace_leaf cannot fail.
        let new_prefix = replace_leaf(&old_prefix, new_name)
            .ok_or_else(|| AppError::invalid_path("Cannot rename the root"))?;

        if new_prefix != old_prefix && self.namespace.exists_at(user_id, &new_prefix).await? {
            return Err(AppError::conflict(format!(
                "An entry already exists at '{new_prefix}'"
            )));
        }

        let renamed = self
            .namespace
            .rename_subtree(user_id, &old_prefix, &new_prefix, new_name)
            .await?;

        info!(
            user_id = %user_id,
            old_prefix = %old_prefix,
            new_prefix = %new_prefix,
            renamed,
            "Folder renamed"
        );

        Ok(RenamedFolder {
            new_name: new_name.to_string(),
            new_prefix,
            renamed,
        })
    }

    /// Deletes the folder at the given raw prefix along with every
    /// descendant row.
    ///
    /// Blob cleanup and quota crediting happen outside the namespace
    /// transaction, from the returned rows.
    pub async fn delete(&self, user_id: Uuid, raw_prefix: &str) -> AppResult<DeletedFolder> {
        let prefix = normalize_prefix(raw_prefix);
        let removed = self.namespace.delete_subtree(user_id, &prefix).await?;

        if removed.is_empty() {
            return Err(AppError::not_found(format!(
                "No folder or files found at '{prefix}'"
            )));
        }

        info!(
            user_id = %user_id,
            prefix = %prefix,
            count = removed.len(),
            "Folder deleted"
        );

        Ok(DeletedFolder {
            count: removed.len() as u64,
            removed,
        })
    }

    /// Lists the contents of the given raw prefix.
    ///
    /// An empty listing is a valid answer, not an error.
    pub async fn list(&self, user_id: Uuid, raw_prefix: &str) -> AppResult<FolderListing> {
        let prefix = normalize_prefix(raw_prefix);
        let rows = self.namespace.list_subtree(user_id, &prefix).await?;
        Ok(assemble(&prefix, rows))
    }
}
