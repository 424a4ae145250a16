//! Folder handlers: create, list, rename, delete.

use axum::Json;
use axum::extract::{Query, State};

use shelf_core::error::AppError;

use crate::dto::request::{CreateFolderRequest, PrefixQuery, RenameFolderRequest};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let folder = state.folder_service.create(user.id, &req.prefix).await?;

    state
        .activity_service
        .record(
            user.id,
            Some(folder.id),
            "folder_create",
            Some(serde_json::json!({ "prefix": folder.prefix })),
        )
        .await;

    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// GET /api/folders?prefix=
pub async fn list_folder(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PrefixQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let prefix = query.prefix.as_deref().unwrap_or("/");
    let listing = state.folder_service.list(user.id, prefix).await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": listing }),
    ))
}

/// PUT /api/folders/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<RenameFolderRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let renamed = state
        .folder_service
        .rename(user.id, &req.prefix, &req.new_name)
        .await?;

    state
        .activity_service
        .record(
            user.id,
            None,
            "folder_rename",
            Some(serde_json::json!({
                "prefix": req.prefix,
                "new_prefix": renamed.new_prefix,
            })),
        )
        .await;

    Ok(Json(
        serde_json::json!({ "success": true, "data": renamed }),
    ))
}

/// DELETE /api/folders?prefix=
pub async fn delete_folder(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PrefixQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let prefix = query
        .prefix
        .ok_or_else(|| AppError::validation("prefix query parameter is required"))?;

    let deleted = state.folder_service.delete(user.id, &prefix).await?;
    state
        .object_service
        .reclaim(user.id, &deleted.removed)
        .await;

    state
        .activity_service
        .record(
            user.id,
            None,
            "folder_delete",
            Some(serde_json::json!({ "prefix": prefix, "count": deleted.count })),
        )
        .await;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "count": deleted.count }
    })))
}
