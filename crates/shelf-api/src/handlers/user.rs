//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use shelf_core::error::AppError;
use shelf_entity::user::User;
use shelf_service::user::UpdateProfile;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        created_at: user.created_at,
    }
}

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let profile = state.user_service.profile(user.id).await?;
    Ok(Json(ApiResponse::ok(user_response(&profile))))
}

/// PUT /api/users/me
///
/// Updates name, email, and password in one call. A password change
/// requires the current password alongside the new one.
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    if let Some(new_password) = &req.new_password {
        let current = req.current_password.as_deref().ok_or_else(|| {
            AppError::validation("Current password is required to change the password")
        })?;
        state
            .user_service
            .change_password(user.id, current, new_password)
            .await?;
    }

    if req.name.is_some() || req.email.is_some() {
        state
            .user_service
            .update_profile(
                user.id,
                UpdateProfile {
                    name: req.name,
                    email: req.email,
                },
            )
            .await?;
    }

    let profile = state.user_service.profile(user.id).await?;
    Ok(Json(ApiResponse::ok(user_response(&profile))))
}

/// DELETE /api/users/me
///
/// Blobs are purged first; the row deletion then cascades through
/// entries, quota, shares, and tokens.
pub async fn delete_account(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.object_service.purge_user(user.id).await?;
    state.user_service.delete_account(user.id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account deleted".to_string(),
    })))
}
