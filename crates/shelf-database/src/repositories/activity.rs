//! Activity log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_core::types::pagination::{PageRequest, PageResponse};
use shelf_entity::activity::ActivityEvent;

/// Repository for the append-only activity log.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an activity event.
    pub async fn record(
        &self,
        user_id: Uuid,
        entry_id: Option<Uuid>,
        action: &str,
        detail: Option<serde_json::Value>,
    ) -> AppResult<ActivityEvent> {
        sqlx::query_as::<_, ActivityEvent>(
            "INSERT INTO activity_log (user_id, entry_id, action, detail) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(entry_id)
        .bind(action)
        .bind(detail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record activity", e))
    }

    /// A user's activity, newest first, paginated.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityEvent>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activity_log WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count activity", e)
            })?;

        let events = sqlx::query_as::<_, ActivityEvent>(
            "SELECT * FROM activity_log WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list activity", e))?;

        Ok(PageResponse::new(events, total, page))
    }

    /// Activity touching one entry, newest first, paginated.
    pub async fn list_for_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityEvent>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_log WHERE user_id = $1 AND entry_id = $2",
        )
        .bind(user_id)
        .bind(entry_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count entry activity", e)
        })?;

        let events = sqlx::query_as::<_, ActivityEvent>(
            "SELECT * FROM activity_log WHERE user_id = $1 AND entry_id = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(entry_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list entry activity", e)
        })?;

        Ok(PageResponse::new(events, total, page))
    }
}
