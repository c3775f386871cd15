use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppResult, ErrorResponse};
use crate::handlers::extract::{ApiJson, ApiQuery, TodoId};
use crate::handlers::{storage_failure, validate_optional, validate_required};
use crate::models::{CreateTodo, Priority, Todo, TodoFilter, TodoPatch};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Request to create a todo. Server-owned fields are ignored if sent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoCreate {
    /// Must contain at least one non-whitespace character
    #[schema(min_length = 1, example = "buy milk")]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date: Option<OffsetDateTime>,
}

/// Partial update; omitted (or null) fields are left unchanged
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TodoUpdate {
    /// When present, must contain at least one non-whitespace character
    #[schema(min_length = 1)]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TodoRead {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<Todo> for TodoRead {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            priority: t.priority,
            due_date: t.due_date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Equality filters for listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoQuery {
    /// Only todos with this completion state
    pub completed: Option<bool>,
    /// Only todos with this priority
    pub priority: Option<Priority>,
}

impl From<TodoQuery> for TodoFilter {
    fn from(q: TodoQuery) -> Self {
        Self {
            completed: q.completed,
            priority: q.priority,
        }
    }
}

// ============ Handlers ============

/// Create a new todo
#[utoipa::path(
    post,
    path = "/todos",
    request_body = TodoCreate,
    responses(
        (status = 201, description = "Todo created successfully", body = TodoRead),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TodoCreate>,
) -> AppResult<(StatusCode, Json<TodoRead>)> {
    validate_required(&payload.title, "title")?;

    let create_todo = CreateTodo {
        title: payload.title,
        description: payload.description,
        priority: payload.priority,
        due_date: payload.due_date,
    };

    let todo = state
        .todos
        .create_todo(create_todo)
        .await
        .map_err(storage_failure("create"))?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// List todos, optionally filtered
#[utoipa::path(
    get,
    path = "/todos",
    params(TodoQuery),
    responses(
        (status = 200, description = "Matching todos (possibly empty)", body = Vec<TodoRead>),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn list_todos(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TodoQuery>,
) -> AppResult<Json<Vec<TodoRead>>> {
    let todos = state
        .todos
        .list_todos(params.into())
        .await
        .map_err(storage_failure("list"))?;

    Ok(Json(todos.into_iter().map(|t| t.into()).collect()))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo details", body = TodoRead),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> AppResult<Json<TodoRead>> {
    let todo = state
        .todos
        .get_todo(id)
        .await
        .map_err(storage_failure("get"))?;
    Ok(Json(todo.into()))
}

/// Update a todo; only supplied fields change
#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    request_body = TodoUpdate,
    responses(
        (status = 200, description = "Todo updated successfully", body = TodoRead),
        (status = 400, description = "Malformed ID or body", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    ApiJson(payload): ApiJson<TodoUpdate>,
) -> AppResult<Json<TodoRead>> {
    validate_optional(&payload.title, "title")?;

    let patch = TodoPatch {
        title: payload.title,
        description: payload.description,
        completed: payload.completed,
        priority: payload.priority,
        due_date: payload.due_date,
    };
    if patch.is_empty() {
        tracing::debug!(%id, "empty update only refreshes updated_at");
    }

    let todo = state
        .todos
        .update_todo(id, patch)
        .await
        .map_err(storage_failure("update"))?;
    Ok(Json(todo.into()))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 204, description = "Todo deleted successfully"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> AppResult<StatusCode> {
    state
        .todos
        .delete_todo(id)
        .await
        .map_err(storage_failure("delete"))?;
    Ok(StatusCode::NO_CONTENT)
}
