//! Activity recording and queries.
//!
//! Recording is best-effort. An operation that succeeded has succeeded;
//! a failed audit insert is logged and never turns into a client error.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::types::{PageRequest, PageResponse};
use shelf_database::repositories::{ActivityRepository, EntryRepository};
use shelf_database::NamespaceStore;
use shelf_entity::activity::ActivityEvent;

/// Handles the append-only activity log.
#[derive(Debug, Clone)]
pub struct ActivityService {
    /// Activity repository.
    activity: Arc<ActivityRepository>,
    /// Entry repository, for ownership checks on per-entry queries.
    entries: Arc<EntryRepository>,
}

impl ActivityService {
    /// Creates a new activity service.
    pub fn new(activity: Arc<ActivityRepository>, entries: Arc<EntryRepository>) -> Self {
        Self { activity, entries }
    }

    /// Records an event, swallowing failures.
    pub async fn record(
        &self,
        user_id: Uuid,
        entry_id: Option<Uuid>,
        action: &str,
        detail: Option<Value>,
    ) {
        if let Err(e) = self.activity.record(user_id, entry_id, action, detail).await {
            warn!(
                user_id = %user_id,
                action,
                error = %e,
                "Failed to record activity"
            );
        }
    }

    /// The user's recent activity, newest first.
    pub async fn for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityEvent>> {
        self.activity.list_for_user(user_id, page).await
    }

    /// Activity touching one entry the user owns.
    pub async fn for_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityEvent>> {
        self.entries
            .find_entry(user_id, entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))?;

        self.activity.list_for_entry(user_id, entry_id, page).await
    }
}
