//! Public access link handlers.
//!
//! `public_download` is the one unauthenticated route in the API; the
//! link id is the capability.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use uuid::Uuid;

use shelf_core::error::AppError;

use crate::dto::request::CreateLinkRequest;
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateLinkRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let link = state
        .link_service
        .create(user.id, req.entry_id, req.expires_in_seconds)
        .await?;

    state
        .activity_service
        .record(
            user.id,
            Some(req.entry_id),
            "link_create",
            Some(serde_json::json!({ "expires_at": link.expires_at })),
        )
        .await;

    Ok(Json(serde_json::json!({ "success": true, "data": link })))
}

/// GET /api/links/{id}: unauthenticated download
pub async fn public_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let entry = state.link_service.resolve(id).await?;
    let stream = state.object_service.open_stream(&entry).await?;

    let content_type = entry
        .mime_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", entry.name),
        )
        .header(header::CONTENT_LENGTH, entry.size)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// GET /api/objects/{id}/links: active links for one of the caller's files
pub async fn object_links(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let links = state.link_service.list_for_entry(user.id, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": links })))
}

/// DELETE /api/links/{id}
pub async fn revoke_link(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.link_service.revoke(user.id, id).await?;

    state
        .activity_service
        .record(
            user.id,
            None,
            "link_revoke",
            Some(serde_json::json!({ "link_id": id })),
        )
        .await;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "message": "Link revoked" }
    })))
}
