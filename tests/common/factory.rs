use uuid::Uuid;

use todo_service::models::{CreateTodo, Priority, Todo, TodoPatch};
use todo_service::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test todo
    pub async fn create_todo(&self) -> Todo {
        self.create_todo_with(&format!("Test Todo {}", Uuid::new_v4()), None)
            .await
    }

    /// Create a test todo with specific title and priority
    pub async fn create_todo_with(&self, title: &str, priority: Option<Priority>) -> Todo {
        let input = CreateTodo {
            title: title.to_string(),
            description: Some("Test todo description".to_string()),
            priority,
            due_date: None,
        };

        self.state.todos.create_todo(input).await.unwrap()
    }

    /// Create a test todo that is already completed
    pub async fn create_completed_todo(&self, priority: Option<Priority>) -> Todo {
        let todo = self.create_todo_with("Done already", priority).await;
        let patch = TodoPatch {
            completed: Some(true),
            ..Default::default()
        };

        self.state.todos.update_todo(todo.id, patch).await.unwrap()
    }
}
