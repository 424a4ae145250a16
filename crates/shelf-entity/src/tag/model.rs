//! Tag entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A label attachable to file entries.
///
/// Tag names are globally unique; attachment lives in the `entry_tags`
/// join table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// Unique tag name.
    pub name: String,
}
