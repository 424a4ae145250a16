//! Quota handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::UpdateQuotaRequest;
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/quota
pub async fn get_quota(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<serde_json::Value>> {
    let quota = state.quota_service.get(user.id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": quota })))
}

/// PUT /api/quota
pub async fn update_quota(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateQuotaRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let quota = state
        .quota_service
        .update_limit(user.id, req.storage_limit)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": quota })))
}
