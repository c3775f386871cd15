use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{timestamp_now, CreateTodo, Todo, TodoFilter, TodoPatch};
use crate::repositories::{
    log_failure, todo_not_found, TodoCreator, TodoDeleter, TodoReader, TodoUpdater,
};

/// In-memory todo store for tests and database-less local runs.
/// Rows are kept in insertion order and carry the same constraints as the table.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    rows: Arc<Mutex<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

/// Same rule as the `todos.title` CHECK: blank after trimming is rejected
fn check_title(title: &str, context: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        let err = AppError::Persistence("todos.title violates check constraint".to_string());
        log_failure(context, &err);
        return Err(err);
    }
    Ok(())
}

fn missing(id: Uuid, context: &str) -> AppError {
    let err = todo_not_found(id);
    log_failure(context, &err);
    err
}

#[async_trait]
impl TodoCreator for InMemoryTodoRepository {
    async fn create(&self, input: CreateTodo) -> AppResult<Todo> {
        check_title(&input.title, "creating todo")?;

        let todo = Todo::new(input);
        self.rows.lock().await.push(todo.clone());
        Ok(todo)
    }
}

#[async_trait]
impl TodoReader for InMemoryTodoRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Todo> {
        let rows = self.rows.lock().await;
        rows.iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| missing(id, "on get todo"))
    }

    async fn list(&self, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().filter(|t| filter.matches(t)).cloned().collect())
    }
}

#[async_trait]
impl TodoUpdater for InMemoryTodoRepository {
    async fn update(&self, id: Uuid, patch: TodoPatch) -> AppResult<Todo> {
        if let Some(title) = &patch.title {
            check_title(title, "updating todo")?;
        }

        let mut rows = self.rows.lock().await;
        let todo = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| missing(id, "updating todo"))?;

        patch.apply_to(todo, timestamp_now());
        Ok(todo.clone())
    }
}

#[async_trait]
impl TodoDeleter for InMemoryTodoRepository {
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let index = rows
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| missing(id, "deleting todo"))?;
        rows.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn input(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_find_delete() {
        let repo = InMemoryTodoRepository::new();
        assert!(repo.is_empty().await);

        let todo = repo.create(input("water plants")).await.unwrap();
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.find_by_id(todo.id).await.unwrap(), todo);

        repo.delete(todo.id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(todo.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(todo.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_title_violates_constraint() {
        let repo = InMemoryTodoRepository::new();
        let err = repo.create(input("")).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_title_violates_constraint() {
        let repo = InMemoryTodoRepository::new();
        let err = repo.create(input(" \t ")).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));

        let todo = repo.create(input("rake leaves")).await.unwrap();
        let patch = TodoPatch {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let err = repo.update(todo.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(repo.find_by_id(todo.id).await.unwrap().title, "rake leaves");
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryTodoRepository::new();
        let first = repo.create(input("first")).await.unwrap();
        let second = repo
            .create(CreateTodo {
                priority: Some(Priority::High),
                ..input("second")
            })
            .await
            .unwrap();

        let all = repo.list(TodoFilter::default()).await.unwrap();
        assert_eq!(
            all.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        let high = repo
            .list(TodoFilter {
                priority: Some(Priority::High),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, second.id);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryTodoRepository::new();
        let err = repo
            .update(Uuid::new_v4(), TodoPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
