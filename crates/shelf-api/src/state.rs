//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use shelf_auth::JwtDecoder;
use shelf_core::config::ShelfConfig;
use shelf_core::traits::ObjectStore;
use shelf_service::{
    ActivityService, AuthService, FolderService, LinkService, ObjectService, QuotaService,
    SearchService, ShareService, TagService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<ShelfConfig>,
    /// PostgreSQL connection pool, used directly only by health checks.
    pub db_pool: PgPool,
    /// Blob store, used directly only by health checks.
    pub object_store: Arc<dyn ObjectStore>,
    /// JWT token decoder for the auth extractor.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Registration, login, and token lifecycle.
    pub auth_service: Arc<AuthService>,
    /// Profile self-service.
    pub user_service: Arc<UserService>,
    /// Folder namespace operations.
    pub folder_service: Arc<FolderService>,
    /// File object lifecycle.
    pub object_service: Arc<ObjectService>,
    /// Shares between users.
    pub share_service: Arc<ShareService>,
    /// Public access links.
    pub link_service: Arc<LinkService>,
    /// Tag catalog and entry tag sets.
    pub tag_service: Arc<TagService>,
    /// Quota viewing and limits.
    pub quota_service: Arc<QuotaService>,
    /// Tag, date, and keyword search.
    pub search_service: Arc<SearchService>,
    /// Activity audit trail.
    pub activity_service: Arc<ActivityService>,
}
