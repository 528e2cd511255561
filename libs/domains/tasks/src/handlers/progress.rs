use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_helpers::{AppError, JsonBody};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::TasksState;
use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskStatus};
use crate::progress::{DEFAULT_INCREMENT, MAX_PROGRESS, MIN_PROGRESS, ProgressStats};
use crate::repository::TaskRepository;

type SharedState<R> = State<Arc<TasksState<R>>>;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressUpdate {
    /// 0 to 100
    pub progress: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    pub progress: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncrementQuery {
    /// Amount to add, may be negative (default 10)
    pub increment: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressRangeQuery {
    pub min_progress: Option<i32>,
    pub max_progress: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    pub status: Option<TaskStatus>,
}

/// Set a task's progress; status follows
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "progress",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = ProgressUpdate,
    responses(
        (status = 200, description = "Progress updated", body = Task),
        (status = 400, description = "Progress out of range"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn set_progress<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<ProgressUpdate>,
) -> TaskResult<Json<Task>> {
    Ok(Json(state.progress.set_progress(id, body.progress).await?))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "progress",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Current progress", body = ProgressResponse),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_progress<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = state
        .progress
        .get_progress(id)
        .await?
        .ok_or(TaskError::NotFound(id))?;
    Ok(Json(ProgressResponse { progress }))
}

/// Add to a task's progress, clamped to 0..=100
#[utoipa::path(
    post,
    path = "/tasks/{id}/increment",
    tag = "progress",
    params(("id" = i32, Path, description = "Task ID"), IncrementQuery),
    responses(
        (status = 200, description = "Progress updated", body = Task),
        (status = 404, description = "Task not found")
    )
)]
pub async fn increment_progress<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    Query(query): Query<IncrementQuery>,
) -> TaskResult<Json<Task>> {
    let increment = query.increment.unwrap_or(DEFAULT_INCREMENT);
    Ok(Json(state.progress.increment_progress(id, increment).await?))
}

/// Tasks whose progress lies in the given range
#[utoipa::path(
    get,
    path = "/tasks/range/list",
    tag = "progress",
    params(ProgressRangeQuery),
    responses((status = 200, description = "Matching tasks", body = Vec<Task>))
)]
pub async fn tasks_by_progress<R: TaskRepository>(
    State(state): SharedState<R>,
    Query(query): Query<ProgressRangeQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = state
        .progress
        .tasks_by_progress(
            query.min_progress.unwrap_or(MIN_PROGRESS),
            query.max_progress.unwrap_or(MAX_PROGRESS),
        )
        .await?;
    Ok(Json(tasks))
}

/// Aggregate progress, optionally for one status
#[utoipa::path(
    get,
    path = "/stats",
    tag = "progress",
    params(StatsQuery),
    responses((status = 200, description = "Progress statistics", body = ProgressStats))
)]
pub async fn progress_stats<R: TaskRepository>(
    State(state): SharedState<R>,
    Query(query): Query<StatsQuery>,
) -> TaskResult<Json<ProgressStats>> {
    Ok(Json(
        state.progress.calculate_overall_progress(query.status).await?,
    ))
}
