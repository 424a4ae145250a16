//! Tag repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_entity::entry::StorageEntry;
use shelf_entity::tag::Tag;

/// Repository for tags and their entry attachments.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All tags, alphabetically.
    pub async fn all(&self) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    /// Create a tag.
    pub async fn create(&self, name: &str) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("tags_name_key") =>
                {
                    AppError::conflict(format!("Tag '{name}' already exists"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create tag", e),
            })
    }

    /// Delete a tag; attachments cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Tag {id} not found")));
        }
        Ok(())
    }

    /// Replace the tag set of an entry.
    ///
    /// Tags are upserted by name so callers can pass names that do not
    /// exist yet; the `DO UPDATE` arm keeps RETURNING populated on the
    /// conflict path.
    pub async fn set_entry_tags(&self, entry_id: Uuid, names: &[String]) -> AppResult<Vec<Tag>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin tag update", e)
        })?;

        sqlx::query("DELETE FROM entry_tags WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear entry tags", e)
            })?;

        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            let tag = sqlx::query_as::<_, Tag>(
                "INSERT INTO tags (name) VALUES ($1) \
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING *",
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert tag", e))?;

            sqlx::query(
                "INSERT INTO entry_tags (entry_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(entry_id)
            .bind(tag.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach tag", e))?;

            tags.push(tag);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit tag update", e)
        })?;

        Ok(tags)
    }

    /// Tags attached to an entry, alphabetically.
    pub async fn tags_for_entry(&self, entry_id: Uuid) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tags t \
             JOIN entry_tags et ON et.tag_id = t.id \
             WHERE et.entry_id = $1 \
             ORDER BY t.name ASC",
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list entry tags", e))
    }

    /// A user's file entries carrying the named tag.
    pub async fn entries_by_tag(&self, user_id: Uuid, tag_name: &str) -> AppResult<Vec<StorageEntry>> {
        sqlx::query_as::<_, StorageEntry>(
            "SELECT s.* FROM storage_entries s \
             JOIN entry_tags et ON et.entry_id = s.id \
             JOIN tags t ON t.id = et.tag_id \
             WHERE s.user_id = $1 AND t.name = $2 \
             ORDER BY s.prefix ASC, s.name ASC",
        )
        .bind(user_id)
        .bind(tag_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search by tag", e))
    }
}
