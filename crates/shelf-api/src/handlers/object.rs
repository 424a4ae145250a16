//! File object handlers: upload, listing, download, metadata, move,
//! copy, versions.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use shelf_core::error::AppError;
use shelf_core::types::PageRequest;
use shelf_entity::share::SharePermission;
use shelf_service::object::{UploadParams, VersionUpload};

use crate::dto::request::{CopyObjectRequest, MoveObjectRequest, PrefixQuery, UpdateObjectRequest};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/objects/upload: multipart upload
pub async fn upload(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let mut prefix: Option<String> = None;
    let mut description: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "prefix" => {
                prefix = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                mime_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("file is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let entry = state
        .object_service
        .upload(
            user.id,
            UploadParams {
                prefix: prefix.unwrap_or_else(|| "/".to_string()),
                file_name,
                mime_type,
                description,
                data,
            },
        )
        .await?;

    state
        .activity_service
        .record(
            user.id,
            Some(entry.id),
            "upload",
            Some(serde_json::json!({ "name": entry.name, "size": entry.size })),
        )
        .await;

    Ok(Json(serde_json::json!({ "success": true, "data": entry })))
}

/// GET /api/objects?prefix=
///
/// Same listing contract as `GET /api/folders`.
pub async fn list_objects(
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

/// GET /api/objects/{id}/download
///
/// Owners and grantees may download; the share check covers folder
/// shares by prefix.
pub async fn download(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let entry = state
        .share_service
        .require_access(user.id, id, SharePermission::Read)
        .await?;
    let stream = state.object_service.open_stream(&entry).await?;

    state
        .activity_service
        .record(user.id, Some(entry.id), "download", None)
        .await;

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

/// PUT /api/objects/{id}
pub async fn update_object(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateObjectRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let entry = state
        .share_service
        .require_access(user.id, id, SharePermission::Write)
        .await?;

    let updated = state
        .object_service
        .update_metadata(
            entry.user_id,
            entry.id,
            req.name.as_deref(),
            req.description.as_deref(),
        )
        .await?;

    if let Some(tags) = &req.tags {
        state
            .tag_service
            .set_for_entry(entry.user_id, entry.id, tags)
            .await?;
    }

    state
        .activity_service
        .record(user.id, Some(entry.id), "update", None)
        .await;

    Ok(Json(
        serde_json::json!({ "success": true, "data": updated }),
    ))
}

/// DELETE /api/objects/{id}: owner only
pub async fn delete_object(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = state.object_service.delete(user.id, id).await?;

    state
        .activity_service
        .record(
            user.id,
            None,
            "delete",
            Some(serde_json::json!({ "name": removed.name, "size": removed.size })),
        )
        .await;

    Ok(Json(
        serde_json::json!({ "success": true, "data": removed }),
    ))
}

/// PUT /api/objects/{id}/move
pub async fn move_object(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveObjectRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let moved = state
        .object_service
        .move_file(user.id, id, &req.new_prefix)
        .await?;

    state
        .activity_service
        .record(
            user.id,
            Some(moved.id),
            "move",
            Some(serde_json::json!({ "new_prefix": moved.prefix })),
        )
        .await;

    Ok(Json(serde_json::json!({ "success": true, "data": moved })))
}

/// POST /api/objects/{id}/copy
pub async fn copy_object(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CopyObjectRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let copy = state
        .object_service
        .copy(user.id, id, req.new_prefix.as_deref())
        .await?;

    state
        .activity_service
        .record(
            user.id,
            Some(copy.id),
            "copy",
            Some(serde_json::json!({ "source_id": id })),
        )
        .await;

    Ok(Json(serde_json::json!({ "success": true, "data": copy })))
}

/// POST /api/objects/{id}/versions: multipart upload of new content
pub async fn upload_version(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(String::from);
            mime_type = field.content_type().map(String::from);
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
            );
        }
    }

    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let version = state
        .object_service
        .upload_version(
            user.id,
            id,
            VersionUpload {
                file_name,
                mime_type,
                data,
            },
        )
        .await?;

    state
        .activity_service
        .record(
            user.id,
            Some(version.id),
            "version",
            Some(serde_json::json!({ "source_id": id })),
        )
        .await;

    Ok(Json(
        serde_json::json!({ "success": true, "data": version }),
    ))
}

/// GET /api/objects/{id}/versions: chain, newest first
pub async fn list_versions(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let versions = state.object_service.list_versions(user.id, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": versions }),
    ))
}

/// GET /api/objects/{id}/activity
pub async fn object_activity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let events = state.activity_service.for_entry(user.id, id, &page).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": events })))
}
