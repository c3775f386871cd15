pub mod memory;
pub mod todo;

pub use memory::InMemoryTodoRepository;
pub use todo::TodoRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateTodo, Todo, TodoFilter, TodoPatch};

// Every error leaving a repository is either `NotFound` or `Persistence`.

#[async_trait]
pub trait TodoCreator: Send + Sync {
    /// Insert a new todo with a generated id, `completed = false` and fresh timestamps
    async fn create(&self, input: CreateTodo) -> AppResult<Todo>;
}

#[async_trait]
pub trait TodoReader: Send + Sync {
    /// Find todo by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Todo>;

    /// List todos matching every present filter field; empty when nothing matches
    async fn list(&self, filter: TodoFilter) -> AppResult<Vec<Todo>>;
}

#[async_trait]
pub trait TodoUpdater: Send + Sync {
    /// Apply the present patch fields and refresh `updated_at`
    async fn update(&self, id: Uuid, patch: TodoPatch) -> AppResult<Todo>;
}

#[async_trait]
pub trait TodoDeleter: Send + Sync {
    /// Hard delete by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Full set of todo storage capabilities
pub trait TodoStore: TodoCreator + TodoReader + TodoUpdater + TodoDeleter {}

impl<T> TodoStore for T where T: TodoCreator + TodoReader + TodoUpdater + TodoDeleter {}

pub(crate) fn todo_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("todo {}", id))
}

/// Log a classified storage failure before it is handed upward
pub(crate) fn log_failure(context: &str, err: &AppError) {
    match err {
        AppError::NotFound(_) => tracing::warn!(error = %err, "repo error {}", context),
        _ => tracing::error!(error = %err, "repo error {}", context),
    }
}

/// Classify a SeaORM error, attach the todo id to not-found errors and log it
pub(crate) fn storage_error(context: &str, id: Option<Uuid>, err: sea_orm::DbErr) -> AppError {
    let err = match (AppError::from(err), id) {
        (AppError::NotFound(_), Some(id)) => todo_not_found(id),
        (AppError::NotFound(what), None) => AppError::Persistence(what),
        (other, _) => other,
    };
    log_failure(context, &err);
    err
}
