use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::handlers::{self, TodoCreate, TodoRead, TodoUpdate};
use crate::models::Priority;

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo Service", description = "CRUD API over todos"),
    paths(
        handlers::health::health,
        handlers::todo::create_todo,
        handlers::todo::list_todos,
        handlers::todo::get_todo,
        handlers::todo::update_todo,
        handlers::todo::delete_todo,
    ),
    components(schemas(TodoCreate, TodoUpdate, TodoRead, Priority, ErrorResponse)),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Todos", description = "Todo management endpoints")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui`, serving the document at `/api-docs/openapi.json`
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
