//! Quota reads and limit changes.
//!
//! Reservation and release stay inside the object service, next to the
//! uploads that need them; this service only exposes the row and lets
//! the limit be adjusted. A limit below current usage is allowed and
//! simply blocks further uploads until usage drops.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::QuotaRepository;
use shelf_entity::quota::UserQuota;

/// Handles quota viewing and limit updates.
#[derive(Debug, Clone)]
pub struct QuotaService {
    /// Quota repository.
    quotas: Arc<QuotaRepository>,
}

impl QuotaService {
    /// Creates a new quota service.
    pub fn new(quotas: Arc<QuotaRepository>) -> Self {
        Self { quotas }
    }

    /// The user's quota row.
    pub async fn get(&self, user_id: Uuid) -> AppResult<UserQuota> {
        self.quotas
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Quota not found"))
    }

    /// Sets a new storage limit in bytes.
    pub async fn update_limit(&self, user_id: Uuid, storage_limit: i64) -> AppResult<UserQuota> {
        if storage_limit < 0 {
            return Err(AppError::validation("Storage limit cannot be negative"));
        }

        let quota = self.quotas.update_limit(user_id, storage_limit).await?;

        info!(user_id = %user_id, storage_limit, "Storage limit updated");
        Ok(quota)
    }
}
