pub mod common;
pub mod extract;
pub mod health;
pub mod todo;

pub use common::{route_not_found, storage_failure, validate_optional, validate_required};
pub use extract::{ApiJson, ApiQuery, TodoId};
pub use health::health;
pub use todo::{
    create_todo, delete_todo, get_todo, list_todos, update_todo, TodoCreate, TodoQuery, TodoRead,
    TodoUpdate,
};
