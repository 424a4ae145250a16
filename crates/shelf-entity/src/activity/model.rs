//! Activity event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One append-only audit trail record.
///
/// Recording is best-effort: a failed insert is logged and never fails
/// the operation that produced the event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
    /// The entry acted on, if any. Null once the entry is deleted.
    pub entry_id: Option<Uuid>,
    /// Dotted action name, e.g. `file.upload` or `folder.rename`.
    pub action: String,
    /// Free-form event detail.
    pub detail: Option<serde_json::Value>,
    /// When the event happened.
    pub created_at: DateTime<Utc>,
}
