use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::todo::{self, ActiveModel, Column, Entity as TodoEntity};
use crate::error::AppResult;
use crate::models::{timestamp_now, CreateTodo, Todo, TodoFilter, TodoPatch};
use crate::repositories::{
    log_failure, storage_error, todo_not_found, TodoCreator, TodoDeleter, TodoReader, TodoUpdater,
};

/// Todo repository backed by SeaORM; one statement per operation
#[derive(Clone)]
pub struct TodoRepository {
    db: DatabaseConnection,
}

impl TodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoCreator for TodoRepository {
    async fn create(&self, input: CreateTodo) -> AppResult<Todo> {
        let model: ActiveModel = Todo::new(input).into();

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| storage_error("creating todo", None, e))?;
        Ok(result.into())
    }
}

#[async_trait]
impl TodoReader for TodoRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Todo> {
        let model = TodoEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| storage_error("on get todo", Some(id), e))?;

        match model {
            Some(model) => Ok(model.into()),
            None => {
                let err = todo_not_found(id);
                log_failure("on get todo", &err);
                Err(err)
            }
        }
    }

    async fn list(&self, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        let mut query = TodoEntity::find();

        if let Some(completed) = filter.completed {
            query = query.filter(Column::Completed.eq(completed));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(Column::Priority.eq(priority));
        }

        let models = query
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("querying todos", None, e))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

#[async_trait]
impl TodoUpdater for TodoRepository {
    async fn update(&self, id: Uuid, patch: TodoPatch) -> AppResult<Todo> {
        // Only the primary key is known; unset columns stay out of the UPDATE
        let mut active = ActiveModel {
            id: ActiveValue::Unchanged(id),
            ..Default::default()
        };

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        if let Some(completed) = patch.completed {
            active.completed = Set(completed);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(Some(priority));
        }
        if let Some(due_date) = patch.due_date {
            active.due_date = Set(Some(due_date));
        }
        active.updated_at = Set(timestamp_now());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| storage_error("updating todo", Some(id), e))?;
        Ok(result.into())
    }
}

#[async_trait]
impl TodoDeleter for TodoRepository {
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TodoEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| storage_error("deleting todo", Some(id), e))?;

        if result.rows_affected == 0 {
            let err = todo_not_found(id);
            log_failure("deleting todo", &err);
            return Err(err);
        }

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<todo::Model> for Todo {
    fn from(m: todo::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            completed: m.completed,
            priority: m.priority,
            due_date: m.due_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<Todo> for ActiveModel {
    fn from(t: Todo) -> Self {
        Self {
            id: Set(t.id),
            title: Set(t.title),
            description: Set(t.description),
            completed: Set(t.completed),
            priority: Set(t.priority),
            due_date: Set(t.due_date),
            created_at: Set(t.created_at),
            updated_at: Set(t.updated_at),
        }
    }
}
