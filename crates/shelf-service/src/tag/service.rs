//! Tag management.
//!
//! The tag catalog is global; attachments are per entry. Setting an
//! entry's tags replaces the whole set and creates missing catalog
//! rows on the fly.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::{EntryRepository, TagRepository};
use shelf_database::NamespaceStore;
use shelf_entity::tag::Tag;

/// Handles the tag catalog and entry tag sets.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag repository.
    tags: Arc<TagRepository>,
    /// Entry repository, for ownership checks.
    entries: Arc<EntryRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tags: Arc<TagRepository>, entries: Arc<EntryRepository>) -> Self {
        Self { tags, entries }
    }

    /// The full tag catalog, sorted by name.
    pub async fn all(&self) -> AppResult<Vec<Tag>> {
        self.tags.all().await
    }

    /// Adds a tag to the catalog.
    pub async fn create(&self, name: &str) -> AppResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }

        let tag = self.tags.create(name).await?;

        info!(tag_id = %tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }

    /// Removes a tag from the catalog and from every entry carrying it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.tags.delete(id).await?;

        info!(tag_id = %id, "Tag deleted");
        Ok(())
    }

    /// Replaces the tag set of a file the user owns.
    pub async fn set_for_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        names: &[String],
    ) -> AppResult<Vec<Tag>> {
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Tag name cannot be empty"));
        }
        self.entries
            .find_file(user_id, entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let tags = self.tags.set_entry_tags(entry_id, names).await?;

        info!(entry_id = %entry_id, tags = tags.len(), "Entry tags replaced");
        Ok(tags)
    }

    /// The tags attached to a file the user owns.
    pub async fn for_entry(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<Vec<Tag>> {
        self.entries
            .find_file(user_id, entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.tags.tags_for_entry(entry_id).await
    }
}
