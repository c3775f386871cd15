use async_trait::async_trait;
use uuid::Uuid;

use todo_service::error::{AppError, AppResult};
use todo_service::models::{CreateTodo, Todo, TodoFilter, TodoPatch};
use todo_service::repositories::{TodoCreator, TodoDeleter, TodoReader, TodoUpdater};

/// Store whose every call fails the way an unreachable database would
pub struct FailingStore;

fn unreachable_db() -> AppError {
    AppError::Persistence("connection refused (os error 111)".to_string())
}

#[async_trait]
impl TodoCreator for FailingStore {
    async fn create(&self, _input: CreateTodo) -> AppResult<Todo> {
        Err(unreachable_db())
    }
}

#[async_trait]
impl TodoReader for FailingStore {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Todo> {
        Err(unreachable_db())
    }

    async fn list(&self, _filter: TodoFilter) -> AppResult<Vec<Todo>> {
        Err(unreachable_db())
    }
}

#[async_trait]
impl TodoUpdater for FailingStore {
    async fn update(&self, _id: Uuid, _patch: TodoPatch) -> AppResult<Todo> {
        Err(unreachable_db())
    }
}

#[async_trait]
impl TodoDeleter for FailingStore {
    async fn delete(&self, _id: Uuid) -> AppResult<()> {
        Err(unreachable_db())
    }
}
