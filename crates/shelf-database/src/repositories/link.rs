//! Access link repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_entity::share::AccessLink;

/// Repository for public access links.
#[derive(Debug, Clone)]
pub struct AccessLinkRepository {
    pool: PgPool,
}

impl AccessLinkRepository {
    /// Create a new access link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a link to a file entry with an expiry time.
    pub async fn create(&self, entry_id: Uuid, expires_at: DateTime<Utc>) -> AppResult<AccessLink> {
        sqlx::query_as::<_, AccessLink>(
            "INSERT INTO access_links (entry_id, expires_at) \
             VALUES ($1, $2) \
             RETURNING *",
        )
        .bind(entry_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create link", e))
    }

    /// Find a link by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccessLink>> {
        sqlx::query_as::<_, AccessLink>("SELECT * FROM access_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link", e))
    }

    /// Links for a file entry, newest first.
    pub async fn list_for_entry(&self, entry_id: Uuid) -> AppResult<Vec<AccessLink>> {
        sqlx::query_as::<_, AccessLink>(
            "SELECT * FROM access_links WHERE entry_id = $1 ORDER BY created_at DESC",
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))
    }

    /// Delete a link by primary key.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM access_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;

        Ok(result.rows_affected() > 0)
    }
}
