//! Share entity model.
//!
//! A share grants another user access to one target, which is either a
//! single file or a folder subtree. The target is a tagged union rather
//! than a pair of nullable columns, so an impossible "both" or "neither"
//! state cannot be represented in the domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What kind of entry a share points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_target_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShareTargetKind {
    /// A single file entry.
    File,
    /// A folder entry; the share covers every descendant prefix.
    Folder,
}

/// Permission level granted by a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_permission", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    /// Download and list only.
    Read,
    /// Read plus metadata updates.
    Write,
}

/// The target of a share as a tagged union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ShareTarget {
    /// A shared file entry.
    File(Uuid),
    /// A shared folder entry.
    Folder(Uuid),
}

impl ShareTarget {
    /// Assemble a target from its stored columns.
    pub fn new(kind: ShareTargetKind, id: Uuid) -> Self {
        match kind {
            ShareTargetKind::File => Self::File(id),
            ShareTargetKind::Folder => Self::Folder(id),
        }
    }

    /// The stored kind discriminant.
    pub fn kind(&self) -> ShareTargetKind {
        match self {
            Self::File(_) => ShareTargetKind::File,
            Self::Folder(_) => ShareTargetKind::Folder,
        }
    }

    /// The entry id the share points at.
    pub fn entry_id(&self) -> Uuid {
        match self {
            Self::File(id) | Self::Folder(id) => *id,
        }
    }
}

/// A share granting a user access to a file or folder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// User who created the share and owns the target.
    pub owner_id: Uuid,
    /// User the target is shared with.
    pub grantee_id: Uuid,
    /// Target kind discriminant.
    pub target_kind: ShareTargetKind,
    /// Target entry id.
    pub target_id: Uuid,
    /// Permission level granted.
    pub permission: SharePermission,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// The target as a tagged union.
    pub fn target(&self) -> ShareTarget {
        ShareTarget::new(self.target_kind, self.target_id)
    }
}

/// Data required to create a new share.
#[derive(Debug, Clone)]
pub struct NewShare {
    /// Owner of the target.
    pub owner_id: Uuid,
    /// User being granted access.
    pub grantee_id: Uuid,
    /// The share target.
    pub target: ShareTarget,
    /// Permission level.
    pub permission: SharePermission,
}
