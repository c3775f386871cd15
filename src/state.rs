use std::sync::Arc;

use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

use crate::config::{describe_database, Config};
use crate::repositories::{TodoRepository, TodoStore};
use crate::services::TodoService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
}

impl AppState {
    /// Create a new AppState by connecting to PostgreSQL and running migrations
    pub async fn new(config: &Config) -> Result<Self, AppStateError> {
        let db = connect(config).await?;
        Ok(Self::with_store(Arc::new(TodoRepository::new(db))))
    }

    /// Create AppState over any todo store (in-memory or SQLite in tests)
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: TodoStore + 'static,
    {
        Self {
            todos: TodoService::new(store),
        }
    }
}

/// Open the SeaORM pool and bring the schema up to date
pub async fn connect(config: &Config) -> Result<DatabaseConnection, AppStateError> {
    tracing::info!(target_db = %describe_database(&config.database), "open db");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_with(config.database.clone())
        .await
        .map_err(|e| AppStateError::Postgres(e.to_string()))?;

    // Run migrations on the same pool SeaORM uses
    tracing::info!("run migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppStateError::Migration(e.to_string()))?;

    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
