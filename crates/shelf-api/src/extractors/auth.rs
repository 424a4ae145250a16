//! `CurrentUser` extractor: pulls the JWT from the Authorization header
//! and validates it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use shelf_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available to any handler that lists it.
///
/// Extraction fails with 401 when the header is missing, malformed, or
/// carries anything but a live access token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User id from the token subject.
    pub id: Uuid,
    /// Email at the time the token was issued.
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        Ok(CurrentUser {
            id: claims.user_id(),
            email: claims.email,
        })
    }
}
