//! Storage entry entity model.
//!
//! Files and explicitly created folders share one table; `is_folder` is
//! the only polymorphism between them. Hierarchy exists purely in the
//! normalized `prefix` column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata key linking a version row to the row it superseded.
pub const META_PREVIOUS_VERSION: &str = "previous_version_id";

/// A single row of the virtual filesystem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StorageEntry {
    /// Unique entry identifier; also the blob key suffix for files.
    pub id: Uuid,
    /// The tenant that owns this entry.
    pub user_id: Uuid,
    /// Display name, without path separators.
    pub name: String,
    /// Normalized prefix. For a folder this is the folder's own full path;
    /// for a file it is the containing folder path.
    pub prefix: String,
    /// Whether this row is a folder.
    pub is_folder: bool,
    /// Content size in bytes; zero for folders.
    pub size: i64,
    /// MIME type; files only.
    pub mime_type: Option<String>,
    /// Bucket the blob was written to; files only.
    pub bucket: Option<String>,
    /// Free-text description; files only, searchable.
    pub description: Option<String>,
    /// Free-form metadata, e.g. the previous-version link.
    pub metadata: Option<serde_json::Value>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl StorageEntry {
    /// Whether this row is a file.
    pub fn is_file(&self) -> bool {
        !self.is_folder
    }

    /// The id of the version this row superseded, if any.
    pub fn previous_version_id(&self) -> Option<Uuid> {
        self.metadata
            .as_ref()?
            .get(META_PREVIOUS_VERSION)?
            .as_str()?
            .parse()
            .ok()
    }

    /// The extension of the entry name, without the dot.
    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.name)
    }
}

/// The extension of a file name, without the dot.
///
/// Dotfiles like `.gitignore` have no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        return None;
    }
    Some(&name[idx + 1..])
}

/// Data required to insert a new entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    /// Pre-generated identifier (blobs are keyed by it before insert).
    pub id: Uuid,
    /// Owning tenant.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Normalized prefix.
    pub prefix: String,
    /// Whether the entry is a folder.
    pub is_folder: bool,
    /// Size in bytes; zero for folders.
    pub size: i64,
    /// MIME type; files only.
    pub mime_type: Option<String>,
    /// Bucket; files only.
    pub bucket: Option<String>,
    /// Description; files only.
    pub description: Option<String>,
    /// Free-form metadata.
    pub metadata: Option<serde_json::Value>,
}

impl NewEntry {
    /// Build a folder row at the given normalized prefix.
    pub fn folder(user_id: Uuid, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            prefix: prefix.into(),
            is_folder: true,
            size: 0,
            mime_type: None,
            bucket: None,
            description: None,
            metadata: None,
        }
    }

    /// Build a file row under the given normalized prefix.
    pub fn file(
        user_id: Uuid,
        name: impl Into<String>,
        prefix: impl Into<String>,
        size: i64,
        mime_type: Option<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            prefix: prefix.into(),
            is_folder: false,
            size,
            mime_type,
            bucket: Some(bucket.into()),
            description: None,
            metadata: None,
        }
    }
}
