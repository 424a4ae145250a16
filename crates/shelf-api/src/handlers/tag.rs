//! Tag catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::CreateTagRequest;
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<serde_json::Value>> {
    let tags = state.tag_service.all().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tags })))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let tag = state.tag_service.create(&req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tag })))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.tag_service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "message": "Tag deleted" }
    })))
}

/// GET /api/objects/{id}/tags
pub async fn object_tags(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let tags = state.tag_service.for_entry(user.id, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tags })))
}
