use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Malformed identifier, query or body, caught before storage
    #[error("{0}")]
    BadRequest(String),

    // No row for the given identifier
    #[error("{0} not found")]
    NotFound(String),

    // Any other storage-layer failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    // Catch-all at the handler boundary; the message is client-facing
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: i32,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Persistence(cause) => {
                tracing::error!("Persistence error: {}", cause);
                "persistence failure".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: i32::from(status.as_u16()),
            message,
        });

        (status, body).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(what) => AppError::NotFound(what),
            sea_orm::DbErr::RecordNotUpdated => AppError::NotFound("Record".to_string()),
            _ => AppError::Persistence(err.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
