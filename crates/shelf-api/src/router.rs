//! Route definitions for the Shelf HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Auth is
//! enforced per handler through the `CurrentUser` extractor; the only
//! route without it is the public link download.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(object_routes())
        .merge(share_routes())
        .merge(link_routes())
        .merge(tag_routes())
        .merge(quota_routes())
        .merge(search_routes())
        .merge(activity_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/me",
        get(handlers::user::get_profile)
            .put(handlers::user::update_profile)
            .delete(handlers::user::delete_account),
    )
}

/// Folder namespace endpoints
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            post(handlers::folder::create_folder)
                .get(handlers::folder::list_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/rename", put(handlers::folder::rename_folder))
}

/// File object endpoints: upload, listing, download, metadata, move,
/// copy, versions
fn object_routes() -> Router<AppState> {
    Router::new()
        .route("/objects/upload", post(handlers::object::upload))
        .route("/objects", get(handlers::object::list_objects))
        .route("/objects/{id}/download", get(handlers::object::download))
        .route(
            "/objects/{id}",
            put(handlers::object::update_object).delete(handlers::object::delete_object),
        )
        .route("/objects/{id}/move", put(handlers::object::move_object))
        .route("/objects/{id}/copy", post(handlers::object::copy_object))
        .route(
            "/objects/{id}/versions",
            get(handlers::object::list_versions).post(handlers::object::upload_version),
        )
        .route(
            "/objects/{id}/activity",
            get(handlers::object::object_activity),
        )
        .route("/objects/{id}/tags", get(handlers::tag::object_tags))
        .route("/objects/{id}/links", get(handlers::link::object_links))
}

/// Share endpoints
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shares",
            post(handlers::share::create_share).get(handlers::share::list_owned),
        )
        .route("/shares/received", get(handlers::share::list_received))
        .route("/shares/{id}", delete(handlers::share::revoke_share))
}

/// Public access link endpoints
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(handlers::link::create_link))
        .route(
            "/links/{id}",
            get(handlers::link::public_download).delete(handlers::link::revoke_link),
        )
}

/// Tag catalog endpoints
fn tag_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tags",
            get(handlers::tag::list_tags).post(handlers::tag::create_tag),
        )
        .route("/tags/{id}", delete(handlers::tag::delete_tag))
}

/// Quota endpoints
fn quota_routes() -> Router<AppState> {
    Router::new().route(
        "/quota",
        get(handlers::quota::get_quota).put(handlers::quota::update_quota),
    )
}

/// Search endpoints
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search/by-tag", get(handlers::search::by_tag))
        .route("/search/by-date", get(handlers::search::by_date))
        .route("/search/by-keyword", get(handlers::search::by_keyword))
}

/// Activity feed endpoint
fn activity_routes() -> Router<AppState> {
    Router::new().route("/activity", get(handlers::activity::list_activity))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderName, HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}
