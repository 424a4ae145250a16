//! Tag, date-range, and keyword search. All queries are scoped to the
//! calling user; shared entries do not appear in search results.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::{EntryRepository, TagRepository};
use shelf_entity::entry::StorageEntry;

/// Handles entry search.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// Entry repository.
    entries: Arc<EntryRepository>,
    /// Tag repository.
    tags: Arc<TagRepository>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(entries: Arc<EntryRepository>, tags: Arc<TagRepository>) -> Self {
        Self { entries, tags }
    }

    /// Entries carrying the named tag.
    pub async fn by_tag(&self, user_id: Uuid, tag_name: &str) -> AppResult<Vec<StorageEntry>> {
        if tag_name.trim().is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }
        self.tags.entries_by_tag(user_id, tag_name).await
    }

    /// Entries created inside the closed range `[from, to]`.
    pub async fn by_date(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<StorageEntry>> {
        if from > to {
            return Err(AppError::validation(
                "Range start must not be after range end",
            ));
        }
        self.entries.created_between(user_id, from, to).await
    }

    /// Entries whose name or description contains the keyword,
    /// case-insensitively.
    pub async fn by_keyword(&self, user_id: Uuid, keyword: &str) -> AppResult<Vec<StorageEntry>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::validation("Search keyword cannot be empty"));
        }
        self.entries.search_keyword(user_id, keyword).await
    }
}
