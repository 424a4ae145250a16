//! Search handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::{DateRangeQuery, KeywordQuery, TagQuery};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/search/by-tag?tag=
pub async fn by_tag(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<TagQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let entries = state.search_service.by_tag(user.id, &query.tag).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": entries }),
    ))
}

/// GET /api/search/by-date?from=&to=
pub async fn by_date(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let entries = state
        .search_service
        .by_date(user.id, query.from, query.to)
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": entries }),
    ))
}

/// GET /api/search/by-keyword?q=
pub async fn by_keyword(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let entries = state.search_service.by_keyword(user.id, &query.q).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": entries }),
    ))
}
