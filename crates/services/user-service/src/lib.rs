//! User Service Library
//!
//! This crate holds the user domain workflow and its persistence:
//! the `UserRepository` port with SeaORM and in-memory adapters, the
//! database schema, and the `UserService` business rules.

pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::{AppError, AppResult, DatabaseConfig, StorageBackend};
use tracing::info;

use crate::infra::Database;
use crate::repository::{InMemoryUserRepository, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Wired user service plus the database handle backing it, if any.
pub struct UserServiceHandle {
    pub service: Arc<dyn UserService>,
    pub database: Option<Arc<Database>>,
}

/// Build the user service on top of the selected storage backend.
///
/// The postgres backend connects and applies pending migrations first.
pub async fn build(backend: StorageBackend, config: &DatabaseConfig) -> AppResult<UserServiceHandle> {
    let (repo, database): (Arc<dyn UserRepository>, Option<Arc<Database>>) = match backend {
        StorageBackend::Postgres => {
            let db = Database::connect(config).await?;
            let repo = Arc::new(UserStore::new(db.connection()));
            (repo, Some(Arc::new(db)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users are lost on restart");
            (Arc::new(InMemoryUserRepository::new()), None)
        }
    };
    info!(storage = %backend, "User service ready");

    Ok(UserServiceHandle {
        service: Arc::new(UserManager::new(repo)),
        database,
    })
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction, config: &DatabaseConfig) -> AppResult<()> {
    let db = Database::open(config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for entry in db.migration_status().await? {
                let marker = if entry.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, entry.name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations");
            db.migrate_fresh().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
