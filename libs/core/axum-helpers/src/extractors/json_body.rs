use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Json<T>` that rejects with a 400 [`AppError`] instead of axum's plain-text 4xx.
///
/// ```ignore
/// async fn create_task(JsonBody(input): JsonBody<CreateTask>) -> TaskResult<Json<Task>> {
///     // a body like {"due_date": "next tuesday"} never gets here
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
