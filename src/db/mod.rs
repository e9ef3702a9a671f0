use std::sync::Arc;

use anyhow::Context;
use sqlx::migrate::MigrateDatabase;
use sqlx::Postgres;

use crate::config::Config;

pub mod pool;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use postgres::PgTodoRepository;
pub use repository::{RepoError, RepoResult, TodoRepository};
pub use sqlite::SqliteTodoRepository;

/// Storage engine, chosen from the `DATABASE_URL` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Option<Self> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}

/// Connects to the configured store and makes sure the `todos` table exists.
///
/// Nothing is returned until the schema step has succeeded, so callers never
/// see a repository backed by a missing table.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn TodoRepository>> {
    match config.backend {
        Backend::Postgres => {
            if config.database_create_if_missing {
                ensure_pg_database(&config.database_url).await?;
            }

            let pool = pool::create_pg_pool(
                &config.database_url,
                config.database_max_connections.get(),
            )
            .await
            .context("Failed to connect to PostgreSQL")?;
            schema::ensure_pg_schema(&pool)
                .await
                .context("Failed to create todos table")?;

            tracing::info!(backend = "postgres", "Database initialized");
            Ok(Arc::new(PgTodoRepository::new(pool)))
        }
        Backend::Sqlite => {
            let pool = pool::create_sqlite_pool(
                &config.database_url,
                config.database_max_connections.get(),
            )
            .await
            .context("Failed to open SQLite database")?;
            schema::ensure_sqlite_schema(&pool)
                .await
                .context("Failed to create todos table")?;

            tracing::info!(backend = "sqlite", "Database initialized");
            Ok(Arc::new(SqliteTodoRepository::new(pool)))
        }
    }
}

async fn ensure_pg_database(database_url: &str) -> anyhow::Result<()> {
    let exists = Postgres::database_exists(database_url)
        .await
        .context("Failed to check whether the database exists")?;

    if !exists {
        Postgres::create_database(database_url)
            .await
            .context("Failed to create database")?;
        tracing::info!("Created database");
    }

    Ok(())
}
