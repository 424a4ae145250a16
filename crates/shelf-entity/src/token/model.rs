//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The single persisted refresh token for a user.
///
/// Rotated (upserted) on every login and refresh, deleted on logout.
/// A presented refresh token is only honored if it equals this row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// The user this token belongs to.
    pub user_id: Uuid,
    /// The refresh JWT as issued.
    #[serde(skip_serializing)]
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether the stored token is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
