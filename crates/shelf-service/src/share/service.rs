//! Share management and access resolution.
//!
//! A share points at a file or at a folder. A folder share covers every
//! entry whose prefix starts with the shared folder's prefix, which is
//! exactly the subtree thanks to trailing-slash normalization. Access
//! checks resolve against the grantee's shares at request time, so
//! revoking a share takes effect immediately.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::{EntryRepository, ShareRepository, UserRepository};
use shelf_database::NamespaceStore;
use shelf_entity::entry::StorageEntry;
use shelf_entity::share::{NewShare, Share, SharePermission, ShareTarget};

/// Input for creating a share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// What is being shared.
    pub target: ShareTarget,
    /// User receiving access.
    pub grantee_id: Uuid,
    /// Permission level to grant.
    pub permission: SharePermission,
}

/// Handles shares between users.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    shares: Arc<ShareRepository>,
    /// Entry repository, for target validation and access resolution.
    entries: Arc<EntryRepository>,
    /// User repository, for grantee validation.
    users: Arc<UserRepository>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        shares: Arc<ShareRepository>,
        entries: Arc<EntryRepository>,
        users: Arc<UserRepository>,
    ) -> Self {
        Self {
            shares,
            entries,
            users,
        }
    }

    /// Shares a file or folder the owner holds with another user.
    pub async fn create(&self, owner_id: Uuid, params: CreateShare) -> AppResult<Share> {
        if params.grantee_id == owner_id {
            return Err(AppError::validation("Cannot share an entry with yourself"));
        }
        self.users
            .find_by_id(params.grantee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Grantee not found"))?;

        let entry = self
            .entries
            .find_entry(owner_id, params.target.entry_id())
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))?;
        let matches_kind = match params.target {
            ShareTarget::File(_) => entry.is_file(),
            ShareTarget::Folder(_) => entry.is_folder,
        };
        if !matches_kind {
            return Err(AppError::validation(
                "Share target kind does not match the entry",
            ));
        }

        let share = self
            .shares
            .create(&NewShare {
                owner_id,
                grantee_id: params.grantee_id,
                target: params.target,
                permission: params.permission,
            })
            .await?;

        info!(
            share_id = %share.id,
            owner_id = %owner_id,
            grantee_id = %share.grantee_id,
            "Share created"
        );
        Ok(share)
    }

    /// Shares created by the user.
    pub async fn list_owned(&self, owner_id: Uuid) -> AppResult<Vec<Share>> {
        self.shares.list_by_owner(owner_id).await
    }

    /// Shares granted to the user by others.
    pub async fn list_received(&self, grantee_id: Uuid) -> AppResult<Vec<Share>> {
        self.shares.list_by_grantee(grantee_id).await
    }

    /// Removes a share. The owner revokes it; the grantee may also
    /// leave a share they no longer want.
    pub async fn revoke(&self, user_id: Uuid, share_id: Uuid) -> AppResult<()> {
        let share = self
            .shares
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;
        if share.owner_id != user_id && share.grantee_id != user_id {
            return Err(AppError::authorization("Not a party to this share"));
        }

        self.shares.delete(share_id).await?;

        info!(share_id = %share_id, user_id = %user_id, "Share removed");
        Ok(())
    }

    /// Resolves whether a user may act on an entry, returning the entry.
    ///
    /// The owner always may. Anyone else needs a share whose target
    /// covers the entry and whose permission satisfies the requested one.
    pub async fn require_access(
        &self,
        requester_id: Uuid,
        entry_id: Uuid,
        needs: SharePermission,
    ) -> AppResult<StorageEntry> {
        let entry = self
            .entries
            .find_any(entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))?;
        if entry.user_id == requester_id {
            return Ok(entry);
        }

        for share in self.shares.list_by_grantee(requester_id).await? {
            if share.owner_id != entry.user_id || !satisfies(share.permission, needs) {
                continue;
            }
            let covered = match share.target() {
                ShareTarget::File(id) => id == entry.id,
                ShareTarget::Folder(id) => match self.entries.find_any(id).await? {
                    Some(folder) => folder_covers(&folder, &entry),
                    None => false,
                },
            };
            if covered {
                return Ok(entry);
            }
        }

        Err(AppError::authorization(
            "You do not have access to this entry",
        ))
    }
}

/// Whether a granted permission satisfies a required one.
fn satisfies(granted: SharePermission, needs: SharePermission) -> bool {
    granted == SharePermission::Write || needs == SharePermission::Read
}

/// Whether a shared folder covers an entry. Trailing-slash prefixes make
/// this a plain prefix test with no sibling bleed.
fn folder_covers(folder: &StorageEntry, entry: &StorageEntry) -> bool {
    folder.is_folder
        && folder.user_id == entry.user_id
        && entry.prefix.starts_with(&folder.prefix)
}
