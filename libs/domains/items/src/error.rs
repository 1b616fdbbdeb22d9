use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::validation_message;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ItemError {
    /// Unknown or malformed identifier
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {}", validation_message(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => {
                tracing::debug!(item_id = %id, "item lookup missed");
                AppError::NotFound("not found".to_string())
            }
            ItemError::Validation(errors) => AppError::ValidationError(errors),
            ItemError::Database(msg) => AppError::Database(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ItemError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ItemError::Internal(format!("failed to encode item: {}", err))
    }
}
