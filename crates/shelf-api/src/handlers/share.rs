//! Share handlers: grant, list, revoke.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use shelf_entity::share::ShareTarget;
use shelf_service::share::CreateShare;

use crate::dto::request::CreateShareRequest;
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateShareRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let share = state
        .share_service
        .create(
            user.id,
            CreateShare {
                target: ShareTarget::new(req.target_kind, req.target_id),
                grantee_id: req.grantee_id,
                permission: req.permission,
            },
        )
        .await?;

    state
        .activity_service
        .record(
            user.id,
            Some(share.target_id),
            "share_create",
            Some(serde_json::json!({
                "grantee_id": share.grantee_id,
                "permission": share.permission,
            })),
        )
        .await;

    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// GET /api/shares: shares the caller granted
pub async fn list_owned(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<serde_json::Value>> {
    let shares = state.share_service.list_owned(user.id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": shares })))
}

/// GET /api/shares/received: shares granted to the caller
pub async fn list_received(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<serde_json::Value>> {
    let shares = state.share_service.list_received(user.id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": shares })))
}

/// DELETE /api/shares/{id}: owner or grantee may revoke
pub async fn revoke_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.share_service.revoke(user.id, id).await?;

    state
        .activity_service
        .record(
            user.id,
            None,
            "share_revoke",
            Some(serde_json::json!({ "share_id": id })),
        )
        .await;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "message": "Share revoked" }
    })))
}
