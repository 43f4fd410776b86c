//! Postgres pool and schema management.

use std::collections::HashSet;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use common::DatabaseConfig;

use super::migrations::Migrator;

/// One known migration and whether the database has applied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEntry {
    pub name: String,
    pub applied: bool,
}

/// Pooled connection to the users database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.migrate_up().await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connected and schema up to date"
        );
        Ok(db)
    }

    /// Open the pool without touching the schema.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        Ok(Self {
            connection: SeaDatabase::connect(options).await?,
        })
    }

    /// Handle for repositories; clones share the pool.
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent migration.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Drop everything and reapply all migrations.
    pub async fn migrate_fresh(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Known migrations in declaration order.
    pub async fn migration_status(&self) -> Result<Vec<MigrationEntry>, DbErr> {
        // The tracking table is missing until the first `up`.
        let applied: HashSet<String> = match seaql_migrations::Entity::find()
            .all(&self.connection)
            .await
        {
            Ok(rows) => rows.into_iter().map(|row| row.version).collect(),
            Err(e) => {
                tracing::debug!("No migration history: {}", e);
                HashSet::new()
            }
        };

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                MigrationEntry {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}
