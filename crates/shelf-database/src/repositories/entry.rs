//! Entry repository: the PostgreSQL namespace store.
//!
//! All prefix scans use `starts_with(prefix, $n)` instead of `LIKE` so
//! that caller-supplied prefixes are taken literally; `%` and `_` in a
//! path must never act as wildcards. The partial unique index
//! `storage_entries_user_folder_prefix_key` (one folder row per user and
//! prefix) turns racing folder writes into conflict errors inside the
//! transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_entity::entry::{NewEntry, StorageEntry};

use crate::namespace::NamespaceStore;

/// The index backing the one-folder-per-prefix invariant.
const FOLDER_PREFIX_KEY: &str = "storage_entries_user_folder_prefix_key";

/// Repository for the prefix-addressed entry table.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: PgPool,
}

impl EntryRepository {
    /// Create a new entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File entries created inside a time window, newest first.
    pub async fn created_between(
        &self,
        user_id: Uuid,
        from: chrono::DateTime<chrono::Utc>,
        to: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Vec<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "SELECT * FROM storage_entries \
             WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3 \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search by date", e))
    }

    /// Find an entry by id regardless of owner.
    ///
    /// Share and link resolution must cross tenant scopes; every other
    /// lookup goes through the user-scoped [`NamespaceStore`] methods.
    pub async fn find_any(&self, id: Uuid) -> AppResult<Option<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>("SELECT * FROM storage_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entry", e))
    }

    /// Entries whose name or description contains the keyword,
    /// case-insensitively.
    pub async fn search_keyword(&self, user_id: Uuid, keyword: &str) -> AppResult<Vec<StorageEntry>> {
        let pattern = format!("%{keyword}%");
        sqlx::query_as::<_, StorageEntry>(
            "SELECT * FROM storage_entries \
             WHERE user_id = $1 AND (name ILIKE $2 OR description ILIKE $2) \
             ORDER BY prefix ASC, name ASC",
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search by keyword", e))
    }
}

#[async_trait]
impl NamespaceStore for EntryRepository {
    async fn insert(&self, entry: &NewEntry) -> AppResult<StorageEntry> {
        sqlx::query_as::<_, StorageEntry>(
            "INSERT INTO storage_entries \
                 (id, user_id, name, prefix, is_folder, size, mime_type, bucket, description, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(&entry.name)
        .bind(&entry.prefix)
        .bind(entry.is_folder)
        .bind(entry.size)
        .bind(&entry.mime_type)
        .bind(&entry.bucket)
        .bind(&entry.description)
        .bind(&entry.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(FOLDER_PREFIX_KEY) {
                    return AppError::conflict(format!(
                        "A folder already exists at '{}'",
                        entry.prefix
                    ));
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to insert entry", e)
        })
    }

    async fn find_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "SELECT * FROM storage_entries WHERE user_id = $1 AND id = $2",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entry", e))
    }

    async fn find_file(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "SELECT * FROM storage_entries WHERE user_id = $1 AND id = $2 AND NOT is_folder",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn exists_at(&self, user_id: Uuid, prefix: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM storage_entries WHERE user_id = $1 AND prefix = $2)",
        )
        .bind(user_id)
        .bind(prefix)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to probe prefix", e))
    }

    async fn exists_under(&self, user_id: Uuid, prefix: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM storage_entries \
             WHERE user_id = $1 AND starts_with(prefix, $2) AND prefix <> $2)",
        )
        .bind(user_id)
        .bind(prefix)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to probe descendants", e))
    }

    async fn list_subtree(&self, user_id: Uuid, prefix: &str) -> AppResult<Vec<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "SELECT * FROM storage_entries \
             WHERE user_id = $1 AND starts_with(prefix, $2) \
             ORDER BY prefix ASC, name ASC",
        )
        .bind(user_id)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subtree", e))
    }

    async fn rename_subtree(
        &self,
        user_id: Uuid,
        old_prefix: &str,
        new_prefix: &str,
        new_name: &str,
    ) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin rename transaction", e)
        })?;

        // Serialize competing renames of the same folder on its row lock.
        sqlx::query("SELECT id FROM storage_entries WHERE user_id = $1 AND prefix = $2 AND is_folder FOR UPDATE")
            .bind(user_id)
            .bind(old_prefix)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder row", e))?;

        sqlx::query(
            "UPDATE storage_entries SET name = $3, updated_at = NOW() \
             WHERE user_id = $1 AND prefix = $2 AND is_folder",
        )
        .bind(user_id)
        .bind(old_prefix)
        .bind(new_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder row", e))?;

        let rewritten = sqlx::query(
            "UPDATE storage_entries \
             SET prefix = $3 || substr(prefix, char_length($2) + 1), updated_at = NOW() \
             WHERE user_id = $1 AND starts_with(prefix, $2)",
        )
        .bind(user_id)
        .bind(old_prefix)
        .bind(new_prefix)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(FOLDER_PREFIX_KEY) {
                    return AppError::conflict(format!(
                        "A folder already exists at '{new_prefix}'"
                    ));
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to rewrite prefixes", e)
        })?
        .rows_affected();

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rename transaction", e)
        })?;

        Ok(rewritten)
    }

    async fn delete_subtree(&self, user_id: Uuid, prefix: &str) -> AppResult<Vec<StorageEntry>> {
        // A single statement, so the subtree goes in one atomic step.
        sqlx::query_as::<_, StorageEntry>(
            "DELETE FROM storage_entries \
             WHERE user_id = $1 AND starts_with(prefix, $2) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete subtree", e))
    }

    async fn update_file_prefix(
        &self,
        user_id: Uuid,
        id: Uuid,
        new_prefix: &str,
    ) -> AppResult<StorageEntry> {
        sqlx::query_as::<_, StorageEntry>(
            "UPDATE storage_entries SET prefix = $3, updated_at = NOW() \
             WHERE user_id = $1 AND id = $2 AND NOT is_folder \
             RETURNING *",
        )
        .bind(user_id)
        .bind(id)
        .bind(new_prefix)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move file", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn update_file_metadata(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<StorageEntry> {
        sqlx::query_as::<_, StorageEntry>(
            "UPDATE storage_entries \
             SET name = $3, description = COALESCE($4, description), updated_at = NOW() \
             WHERE user_id = $1 AND id = $2 AND NOT is_folder \
             RETURNING *",
        )
        .bind(user_id)
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file metadata", e))?
        .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn delete_file(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "DELETE FROM storage_entries \
             WHERE user_id = $1 AND id = $2 AND NOT is_folder \
             RETURNING *",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))
    }

    async fn list_user_files(&self, user_id: Uuid) -> AppResult<Vec<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "SELECT * FROM storage_entries WHERE user_id = $1 AND NOT is_folder",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user files", e))
    }
}
