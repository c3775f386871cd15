use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateTodo, Todo, TodoFilter, TodoPatch};
use crate::repositories::{TodoCreator, TodoDeleter, TodoReader, TodoStore, TodoUpdater};

/// Todo use cases. Each method delegates to exactly one storage capability.
#[derive(Clone)]
pub struct TodoService {
    creator: Arc<dyn TodoCreator>,
    reader: Arc<dyn TodoReader>,
    updater: Arc<dyn TodoUpdater>,
    deleter: Arc<dyn TodoDeleter>,
}

impl TodoService {
    /// Build a service whose capabilities are all served by one store
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: TodoStore + 'static,
    {
        Self {
            creator: store.clone(),
            reader: store.clone(),
            updater: store.clone(),
            deleter: store,
        }
    }

    /// Build a service from independently supplied capabilities
    pub fn from_parts(
        creator: Arc<dyn TodoCreator>,
        reader: Arc<dyn TodoReader>,
        updater: Arc<dyn TodoUpdater>,
        deleter: Arc<dyn TodoDeleter>,
    ) -> Self {
        Self {
            creator,
            reader,
            updater,
            deleter,
        }
    }

    pub async fn create_todo(&self, input: CreateTodo) -> AppResult<Todo> {
        self.creator.create(input).await.inspect_err(|err| {
            tracing::error!(error = %err, "service error creating todo");
        })
    }

    pub async fn list_todos(&self, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        self.reader.list(filter).await
    }

    pub async fn get_todo(&self, id: Uuid) -> AppResult<Todo> {
        self.reader.find_by_id(id).await
    }

    pub async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> AppResult<Todo> {
        self.updater.update(id, patch).await
    }

    pub async fn delete_todo(&self, id: Uuid) -> AppResult<()> {
        self.deleter.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::InMemoryTodoRepository;
    use async_trait::async_trait;

    /// Creator that always fails, as a broken database would
    struct FailingCreator;

    #[async_trait]
    impl TodoCreator for FailingCreator {
        async fn create(&self, _input: CreateTodo) -> AppResult<Todo> {
            Err(AppError::Persistence("connection refused".to_string()))
        }
    }

    fn input(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_delegates_to_store() {
        let store = Arc::new(InMemoryTodoRepository::new());
        let service = TodoService::new(store.clone());

        let todo = service.create_todo(input("call mum")).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(service.get_todo(todo.id).await.unwrap(), todo);

        let updated = service
            .update_todo(
                todo.id,
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.completed);

        let listed = service.list_todos(TodoFilter::default()).await.unwrap();
        assert_eq!(listed, vec![updated]);

        service.delete_todo(todo.id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let service = TodoService::new(Arc::new(InMemoryTodoRepository::new()));

        let err = service.get_todo(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.delete_todo(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_failure_propagates() {
        let store = Arc::new(InMemoryTodoRepository::new());
        let service = TodoService::from_parts(
            Arc::new(FailingCreator),
            store.clone(),
            store.clone(),
            store.clone(),
        );

        let err = service.create_todo(input("never stored")).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert!(store.is_empty().await);
    }
}
