//! Application builder: wires repositories, services, and the router
//! into a running Axum server.

use std::sync::Arc;

use axum::Router;

use shelf_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordPolicy};
use shelf_core::config::ShelfConfig;
use shelf_core::error::AppError;
use shelf_database::repositories::{
    AccessLinkRepository, ActivityRepository, EntryRepository, QuotaRepository, ShareRepository,
    TagRepository, TokenRepository, UserRepository,
};
use shelf_database::{DatabasePool, NamespaceStore};
use shelf_service::{
    ActivityService, AuthService, FolderService, LinkService, ObjectService, QuotaService,
    SearchService, ShareService, TagService, UserService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application for the given state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Shelf server with the given configuration.
pub async fn run_server(config: ShelfConfig) -> Result<(), AppError> {
    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let database = DatabasePool::connect(&config.database).await?;
    let db_pool = database.pool().clone();

    tracing::info!("Running database migrations...");
    shelf_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Object store ─────────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Connecting object store...");
    let object_store = shelf_storage::connect(&config.storage).await?;

    // ── Step 3: Repositories ─────────────────────────────────────
    let entry_repo = Arc::new(EntryRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let token_repo = Arc::new(TokenRepository::new(db_pool.clone()));
    let quota_repo = Arc::new(QuotaRepository::new(db_pool.clone()));
    let share_repo = Arc::new(ShareRepository::new(db_pool.clone()));
    let link_repo = Arc::new(AccessLinkRepository::new(db_pool.clone()));
    let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));
    let activity_repo = Arc::new(ActivityRepository::new(db_pool.clone()));

    let namespace: Arc<dyn NamespaceStore> = entry_repo.clone();

    // ── Step 4: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_policy = Arc::new(PasswordPolicy::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 5: Services ─────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&token_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        config.storage.default_quota_bytes,
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
    ));
    let folder_service = Arc::new(FolderService::new(Arc::clone(&namespace)));
    let object_service = Arc::new(ObjectService::new(
        Arc::clone(&namespace),
        Arc::clone(&object_store),
        Arc::clone(&quota_repo),
        config.storage.clone(),
    ));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&entry_repo),
        Arc::clone(&user_repo),
    ));
    let link_service = Arc::new(LinkService::new(
        Arc::clone(&link_repo),
        Arc::clone(&entry_repo),
        config.server.public_base_url.clone(),
    ));
    let tag_service = Arc::new(TagService::new(
        Arc::clone(&tag_repo),
        Arc::clone(&entry_repo),
    ));
    let quota_service = Arc::new(QuotaService::new(Arc::clone(&quota_repo)));
    let search_service = Arc::new(SearchService::new(
        Arc::clone(&entry_repo),
        Arc::clone(&tag_repo),
    ));
    let activity_service = Arc::new(ActivityService::new(
        Arc::clone(&activity_repo),
        Arc::clone(&entry_repo),
    ));

    // ── Step 6: HTTP server ──────────────────────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        object_store,
        jwt_decoder,
        auth_service,
        user_service,
        folder_service,
        object_service,
        share_service,
        link_service,
        tag_service,
        quota_service,
        search_service,
        activity_service,
    };

    let app = build_app(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Shelf server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Shelf server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
