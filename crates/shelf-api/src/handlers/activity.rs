//! Activity feed handlers.

use axum::Json;
use axum::extract::{Query, State};

use shelf_core::types::PageRequest;

use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/activity?page=&per_page=
pub async fn list_activity(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let events = state.activity_service.for_user(user.id, &page).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": events })))
}
