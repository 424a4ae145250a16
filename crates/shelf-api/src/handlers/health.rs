//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
///
/// Probes the database and the object store; reports `degraded` when
/// either fails instead of erroring out.
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db_pool).await.is_ok();
    let storage_ok = matches!(state.object_store.health_check().await, Ok(true));

    let status = if database_ok && storage_ok {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        database: if database_ok { "ok" } else { "unavailable" }.to_string(),
        storage: if storage_ok { "ok" } else { "unavailable" }.to_string(),
    }))
}
