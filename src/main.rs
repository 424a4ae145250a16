//! Shelf Server: multi-tenant file storage over a prefix-addressed
//! virtual filesystem.
//!
//! Main entry point that loads configuration, sets up logging, and
//! hands off to the API crate.

use tracing_subscriber::{EnvFilter, fmt};

use shelf_core::config::ShelfConfig;

#[tokio::main]
async fn main() {
    let env = std::env::var("SHELF_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match ShelfConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        "Starting Shelf v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        env
    );

    if let Err(e) = shelf_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &ShelfConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
