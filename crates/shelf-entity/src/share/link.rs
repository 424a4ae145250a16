//! Public access link entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An unauthenticated download link for a single file entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessLink {
    /// Unique link identifier; appears in the public URL.
    pub id: Uuid,
    /// The file entry this link exposes.
    pub entry_id: Uuid,
    /// When the link stops working.
    pub expires_at: DateTime<Utc>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

impl AccessLink {
    /// Whether the link is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// A generated public link as returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicLink {
    /// The link id.
    pub id: Uuid,
    /// The full URL for unauthenticated access.
    pub url: String,
    /// When the link expires.
    pub expires_at: DateTime<Utc>,
}
