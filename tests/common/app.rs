use std::sync::Arc;

use axum_test::TestServer;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, Schema};
use todo_service::build_router;
use todo_service::docs::swagger_ui;
use todo_service::entity::todo::Entity as TodoEntity;
use todo_service::repositories::{InMemoryTodoRepository, TodoRepository, TodoStore};
use todo_service::state::AppState;

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over the in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryTodoRepository::new()))
    }

    /// Create a test application over the SeaORM repository on in-memory SQLite
    pub async fn sqlite() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .expect("Failed to open SQLite database");

        let backend = db.get_database_backend();
        let stmt = Schema::new(backend).create_table_from_entity(TodoEntity);
        db.execute(backend.build(&stmt))
            .await
            .expect("Failed to create todos table");

        Self::with_store(Arc::new(TodoRepository::new(db)))
    }

    /// Create a test application over any store
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: TodoStore + 'static,
    {
        let state = AppState::with_store(store);
        let router = build_router(state.clone()).merge(swagger_ui());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
