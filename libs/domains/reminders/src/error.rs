use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReminderError {
    /// Services return `None`/`false`; handlers raise this for the 404
    #[error("Reminder not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ReminderResult<T> = Result<T, ReminderError>;

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::NotFound(id) => {
                AppError::NotFound(format!("Reminder {} not found", id))
            }
            ReminderError::Validation(msg) => AppError::Validation(msg),
            ReminderError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for ReminderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ReminderError {
    fn from(err: sea_orm::DbErr) -> Self {
        ReminderError::Database(err.to_string())
    }
}
