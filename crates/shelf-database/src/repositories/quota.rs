//! Quota repository implementation.
//!
//! Reservation is a single conditional UPDATE so that two concurrent
//! uploads can never push `storage_used` past the limit.

use sqlx::PgPool;
use uuid::Uuid;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_entity::quota::UserQuota;

/// Repository for per-user storage accounting.
#[derive(Debug, Clone)]
pub struct QuotaRepository {
    pool: PgPool,
}

impl QuotaRepository {
    /// Create a new quota repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the quota row for a user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<UserQuota>> {
        sqlx::query_as::<_, UserQuota>("SELECT * FROM user_quotas WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find quota", e))
    }

    /// Set a user's storage limit.
    pub async fn update_limit(&self, user_id: Uuid, storage_limit: i64) -> AppResult<UserQuota> {
        sqlx::query_as::<_, UserQuota>(
            "UPDATE user_quotas SET storage_limit = $2, updated_at = NOW() \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(storage_limit)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update limit", e))?
        .ok_or_else(|| AppError::not_found(format!("Quota for user {user_id} not found")))
    }

    /// Atomically reserve `bytes` of capacity.
    ///
    /// The UPDATE only matches when the reservation fits, so a zero row
    /// count means the quota would be exceeded (or the row is missing).
    pub async fn try_reserve(&self, user_id: Uuid, bytes: i64) -> AppResult<UserQuota> {
        let reserved = sqlx::query_as::<_, UserQuota>(
            "UPDATE user_quotas \
             SET storage_used = storage_used + $2, updated_at = NOW() \
             WHERE user_id = $1 AND storage_used + $2 <= storage_limit \
             RETURNING *",
        )
        .bind(user_id)
        .bind(bytes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve quota", e))?;

        if let Some(quota) = reserved {
            return Ok(quota);
        }

        match self.find_by_user(user_id).await? {
            Some(quota) => Err(AppError::quota_exceeded(format!(
                "Upload of {bytes} bytes exceeds remaining quota of {} bytes",
                quota.remaining()
            ))),
            None => Err(AppError::not_found(format!(
                "Quota for user {user_id} not found"
            ))),
        }
    }

    /// Release previously reserved capacity, clamping at zero.
    pub async fn release(&self, user_id: Uuid, bytes: i64) -> AppResult<()> {
        sqlx::query(
            "UPDATE user_quotas \
             SET storage_used = GREATEST(storage_used - $2, 0), updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(bytes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release quota", e))?;
        Ok(())
    }
}
