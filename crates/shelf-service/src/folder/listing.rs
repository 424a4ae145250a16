//! Directory listing assembly.
//!
//! A listing at prefix `P` partitions the subtree rows into the files
//! sitting directly at `P` and the distinct first segments of everything
//! deeper. Subfolder names come from both explicit folder rows and from
//! deeper files whose intermediate folders were never materialized, so
//! implicit folders show up like real ones.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use shelf_core::path::{breadcrumbs, child_segment};
use shelf_entity::entry::StorageEntry;

/// The contents of one folder prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListing {
    /// Distinct immediate subfolder names, sorted.
    pub folders: Vec<String>,
    /// File entries directly at the listed prefix.
    pub files: Vec<StorageEntry>,
    /// Non-empty segments of the listed prefix, in order.
    pub breadcrumbs: Vec<String>,
}

/// Assemble a listing from the subtree rows of a normalized prefix.
///
/// The listed folder's own row contributes nothing; it is neither a file
/// at the prefix nor deeper than it.
pub fn assemble(prefix: &str, rows: Vec<StorageEntry>) -> FolderListing {
    let mut files = Vec::new();
    let mut folders = BTreeSet::new();

    for row in rows {
        if !row.is_folder && row.prefix == prefix {
            files.push(row);
        } else if let Some(segment) = child_segment(&row.prefix, prefix) {
            folders.insert(segment.to_string());
        }
    }

    FolderListing {
        folders: folders.into_iter().collect(),
        files,
        breadcrumbs: breadcrumbs(prefix),
    }
}
