//! User quota entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user storage accounting.
///
/// `storage_used` is debited on upload/copy/version and credited on
/// delete; the reservation happens atomically in SQL so concurrent
/// uploads cannot overshoot the limit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserQuota {
    /// The user this quota belongs to.
    pub user_id: Uuid,
    /// Maximum storage in bytes.
    pub storage_limit: i64,
    /// Currently used storage in bytes.
    pub storage_used: i64,
    /// When the quota row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserQuota {
    /// Remaining capacity in bytes (never negative).
    pub fn remaining(&self) -> i64 {
        (self.storage_limit - self.storage_used).max(0)
    }
}
