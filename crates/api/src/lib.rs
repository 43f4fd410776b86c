//! Users API Library
//!
//! This crate provides the HTTP REST surface over the user service:
//! routing, request extraction, response mapping and OpenAPI docs.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use tracing::info;

use common::{AppError, AppResult};
use user_service_lib::MigrateAction;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the user service on the configured backend and serve HTTP until shutdown.
pub async fn run_server(config: ApiConfig) -> AppResult<()> {
    let handle = user_service_lib::build(config.storage, &config.database).await?;
    let state = AppState::new(handle.service, handle.database);

    let app = create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Users API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

/// Apply a migration action against the configured database.
pub async fn run_migrations(action: MigrateAction, config: ApiConfig) -> AppResult<()> {
    user_service_lib::run_migrations(action, &config.database).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
