use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    /// Services return `None`/`false`; handlers raise this for the 404
    #[error("Tag not found: {0}")]
    NotFound(i32),

    #[error("Tag with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TagResult<T> = Result<T, TagError>;

impl TagError {
    pub(crate) fn from_write(err: DbErr, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => TagError::DuplicateName(name.to_string()),
            _ => err.into(),
        }
    }
}

impl From<TagError> for AppError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::NotFound(id) => AppError::NotFound(format!("Tag {} not found", id)),
            TagError::DuplicateName(name) => {
                AppError::Conflict(format!("Tag with name '{}' already exists", name))
            }
            TagError::Validation(msg) => AppError::Validation(msg),
            TagError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for TagError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for TagError {
    fn from(err: DbErr) -> Self {
        TagError::Database(err.to_string())
    }
}
