//! Share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_entity::share::{NewShare, Share};

/// Repository for user-to-user shares.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a share.
    pub async fn create(&self, data: &NewShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (owner_id, grantee_id, target_kind, target_id, permission) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.grantee_id)
        .bind(data.target.kind())
        .bind(data.target.entry_id())
        .bind(data.permission)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("shares_target_grantee_key") =>
            {
                AppError::conflict("Entry is already shared with this user".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create share", e),
        })
    }

    /// Find a share by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Shares created by an owner, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// Shares granted to a user, newest first.
    pub async fn list_by_grantee(&self, grantee_id: Uuid) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE grantee_id = $1 ORDER BY created_at DESC",
        )
        .bind(grantee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list received shares", e)
        })
    }

    /// Delete a share by primary key.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;

        Ok(result.rows_affected() > 0)
    }
}
