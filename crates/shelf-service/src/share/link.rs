//! Public access links.
//!
//! A link grants unauthenticated download of one file until it expires.
//! Expired links are distinct from missing ones: the row still exists,
//! and resolution reports it as gone rather than never-there.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::{AccessLinkRepository, EntryRepository};
use shelf_database::NamespaceStore;
use shelf_entity::entry::StorageEntry;
use shelf_entity::share::{AccessLink, PublicLink};

/// Handles public access links for files.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Access link repository.
    links: Arc<AccessLinkRepository>,
    /// Entry repository, for ownership checks and resolution.
    entries: Arc<EntryRepository>,
    /// Base URL links are advertised under.
    public_base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<AccessLinkRepository>,
        entries: Arc<EntryRepository>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            links,
            entries,
            public_base_url: public_base_url.into(),
        }
    }

    /// Creates a time-limited public link for a file the user owns.
    pub async fn create(
        &self,
        owner_id: Uuid,
        entry_id: Uuid,
        expires_in_seconds: i64,
    ) -> AppResult<PublicLink> {
        if expires_in_seconds <= 0 {
            return Err(AppError::validation("Expiry must be in the future"));
        }

        let entry = self
            .entries
            .find_file(owner_id, entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let expires_at = Utc::now() + Duration::seconds(expires_in_seconds);
        let link = self.links.create(entry.id, expires_at).await?;

        info!(
            link_id = %link.id,
            entry_id = %entry.id,
            owner_id = %owner_id,
            "Access link created"
        );
        Ok(self.to_public(&link))
    }

    /// Resolves a link to its file for an unauthenticated download.
    pub async fn resolve(&self, link_id: Uuid) -> AppResult<StorageEntry> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;
        if link.is_expired() {
            return Err(AppError::expired("Link has expired"));
        }

        self.entries
            .find_any(link.entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Active and expired links for a file the user owns.
    pub async fn list_for_entry(
        &self,
        owner_id: Uuid,
        entry_id: Uuid,
    ) -> AppResult<Vec<PublicLink>> {
        self.entries
            .find_file(owner_id, entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let links = self.links.list_for_entry(entry_id).await?;
        Ok(links.iter().map(|l| self.to_public(l)).collect())
    }

    /// Revokes a link. Only the file's owner may.
    pub async fn revoke(&self, owner_id: Uuid, link_id: Uuid) -> AppResult<()> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;
        let entry = self
            .entries
            .find_any(link.entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if entry.user_id != owner_id {
            return Err(AppError::authorization("Not the owner of this link"));
        }

        self.links.delete(link_id).await?;

        info!(link_id = %link_id, owner_id = %owner_id, "Access link revoked");
        Ok(())
    }

    fn to_public(&self, link: &AccessLink) -> PublicLink {
        PublicLink {
            id: link.id,
            url: format!(
                "{}/api/links/{}",
                self.public_base_url.trim_end_matches('/'),
                link.id
            ),
            expires_at: link.expires_at,
        }
    }
}
