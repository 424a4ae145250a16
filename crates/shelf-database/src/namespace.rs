//! The namespace store trait: atomic operations over the entry table.
//!
//! Folder semantics reduce to a handful of prefix operations on one flat
//! table. Each trait method is one atomic unit: the PostgreSQL
//! implementation ([`EntryRepository`]) runs multi-row methods inside a
//! transaction, and the in-memory implementation
//! ([`MemoryNamespaceStore`]) runs every method under one lock. Services
//! never compose finer-grained writes than these.
//!
//! The trait lives here rather than in `shelf-core` because it speaks
//! [`StorageEntry`], and `shelf-core` stays free of internal
//! dependencies.
//!
//! [`EntryRepository`]: crate::repositories::EntryRepository
//! [`MemoryNamespaceStore`]: crate::repositories::MemoryNamespaceStore

use async_trait::async_trait;
use uuid::Uuid;

use shelf_core::result::AppResult;
use shelf_entity::entry::{NewEntry, StorageEntry};

/// Atomic operations over the prefix-addressed namespace.
///
/// Every method is scoped to a single `user_id`; no operation can observe
/// or modify another tenant's rows.
#[async_trait]
pub trait NamespaceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new entry row.
    ///
    /// Inserting a folder at a prefix that already holds a folder row
    /// fails with a conflict; this is the transactional backstop behind
    /// the service-level occupancy checks.
    async fn insert(&self, entry: &NewEntry) -> AppResult<StorageEntry>;

    /// Find an entry of either kind by id.
    async fn find_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>>;

    /// Find a file entry by id. Folder rows are not returned.
    async fn find_file(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>>;

    /// Whether any entry, file or folder, sits at exactly this prefix.
    async fn exists_at(&self, user_id: Uuid, prefix: &str) -> AppResult<bool>;

    /// Whether any entry lies strictly below this prefix.
    async fn exists_under(&self, user_id: Uuid, prefix: &str) -> AppResult<bool>;

    /// All rows at or below the prefix, ordered by prefix then name.
    async fn list_subtree(&self, user_id: Uuid, prefix: &str) -> AppResult<Vec<StorageEntry>>;

    /// Atomically rename a folder subtree.
    ///
    /// Sets `name` on the folder row at `old_prefix` (if one exists) and
    /// replaces the leading `old_prefix` with `new_prefix` on every row at
    /// or below it. Returns the number of rewritten rows, which is zero
    /// when nothing matched. A folder row already present at `new_prefix`
    /// surfaces as a conflict.
    async fn rename_subtree(
        &self,
        user_id: Uuid,
        old_prefix: &str,
        new_prefix: &str,
        new_name: &str,
    ) -> AppResult<u64>;

    /// Atomically delete every row at or below the prefix, returning the
    /// removed rows.
    async fn delete_subtree(&self, user_id: Uuid, prefix: &str) -> AppResult<Vec<StorageEntry>>;

    /// Move a file row to a new containing prefix.
    async fn update_file_prefix(
        &self,
        user_id: Uuid,
        id: Uuid,
        new_prefix: &str,
    ) -> AppResult<StorageEntry>;

    /// Update the display name and, when given, the description of a file
    /// row.
    async fn update_file_metadata(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<StorageEntry>;

    /// Delete a single file row, returning it if it existed.
    async fn delete_file(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>>;

    /// All file rows owned by the user, across every prefix.
    async fn list_user_files(&self, user_id: Uuid) -> AppResult<Vec<StorageEntry>>;
}
