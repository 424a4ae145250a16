//! Auth handlers: register, login, refresh, logout, me.

use axum::Json;
use axum::extract::State;

use shelf_entity::user::User;
use shelf_service::auth::{AuthSession, LoginParams, RegisterParams};

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse, UserResponse};
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

fn session_response(session: AuthSession) -> SessionResponse {
    SessionResponse {
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
        access_expires_at: session.tokens.access_expires_at,
        refresh_expires_at: session.tokens.refresh_expires_at,
        user: user_response(&session.user),
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let session = state
        .auth_service
        .register(RegisterParams {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok(session_response(session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let session = state
        .auth_service
        .login(LoginParams {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok(session_response(session))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<shelf_auth::TokenPair>>> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// POST /api/auth/logout
///
/// Takes the refresh token rather than relying on the access token, so a
/// client can still log out after its access token expired.
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let claims = state.jwt_decoder.decode_refresh_token(&req.refresh_token)?;
    state.auth_service.logout(claims.user_id()).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let profile = state.user_service.profile(user.id).await?;
    Ok(Json(ApiResponse::ok(user_response(&profile))))
}
