use crate::error::{AppError, AppResult};

/// Reject blank strings for a required field
pub fn validate_required(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Same as `validate_required`, but only when the field was supplied
pub fn validate_optional(value: &Option<String>, field: &str) -> AppResult<()> {
    match value {
        Some(value) => validate_required(value, field),
        None => Ok(()),
    }
}

/// Replace a storage failure with a client-facing message for `action`.
/// `NotFound` and `BadRequest` pass through untouched.
pub fn storage_failure(action: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::Persistence(_) => AppError::Internal(format!("failed to {} todo", action)),
        other => other,
    }
}

/// Fallback for unknown routes, so they also get a JSON error body
pub async fn route_not_found() -> AppError {
    AppError::NotFound("route".to_string())
}
