//! Credo Server: credential verification and session issuance.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use credo_api::AppState;
use credo_core::config::{AppConfig, StoreBackend};
use credo_core::error::AppError;
use credo_database::migration::run_migrations;
use credo_database::{DatabasePool, MemoryUserStore, UserRepository, UserStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("CREDO_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
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

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Credo v{}", env!("CARGO_PKG_VERSION"));

    let (store, pool) = build_store(&config).await?;

    let state = AppState::new(config, store)?;
    tracing::info!("Auth components initialized");

    let result = credo_api::run_server(state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}

/// Select the user store backend.
async fn build_store(
    config: &AppConfig,
) -> Result<(Arc<dyn UserStore>, Option<DatabasePool>), AppError> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            run_migrations(pool.pool()).await?;
            let repo = UserRepository::new(pool.pool().clone());
            Ok((Arc::new(repo), Some(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; users are lost on restart");
            Ok((Arc::new(MemoryUserStore::new()), None))
        }
    }
}
