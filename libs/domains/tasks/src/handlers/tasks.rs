use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::{AppError, JsonBody, MessageResponse};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::TasksState;
use crate::deadline::{DEFAULT_UPCOMING_DAYS, DeadlineInfo};
use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskListQuery, UpdateTask};
use crate::priority::PriorityInfo;
use crate::repository::TaskRepository;

type SharedState<R> = State<Arc<TasksState<R>>>;

fn task_not_found(id: i32) -> AppError {
    TaskError::NotFound(id).into()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PriorityUpdate {
    /// 1 (highest) to 5 (lowest)
    pub priority: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeadlineUpdate {
    /// ISO-8601 timestamp; no offset means UTC
    pub due_date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpcomingQuery {
    /// Look-ahead window in days (default 7)
    pub days: Option<i64>,
}

/// List tasks, optionally filtered
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(state): SharedState<R>,
    Query(query): Query<TaskListQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_tasks(query.into()).await?;
    Ok(Json(tasks))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<Task>, AppError> {
    let task = state.tasks.get_task(id).await?.ok_or_else(|| task_not_found(id))?;
    Ok(Json(task))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(state): SharedState<R>,
    JsonBody(input): JsonBody<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = state.tasks.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update the supplied fields of a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    JsonBody(input): JsonBody<UpdateTask>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .tasks
        .update_task(id, input)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(task))
}

/// Delete a task; its subtasks become root tasks
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted successfully", body = MessageResponse),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.tasks.delete_task(id).await? {
        return Err(task_not_found(id));
    }
    Ok(Json(MessageResponse::ok("Task deleted successfully")))
}

/// Create a subtask under the given task
#[utoipa::path(
    post,
    path = "/{id}/subtasks",
    tag = "tasks",
    params(("id" = i32, Path, description = "Parent task ID")),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Subtask created", body = Task),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Parent task not found")
    )
)]
pub async fn add_subtask<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    JsonBody(input): JsonBody<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = state.tasks.add_subtask(id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Direct subtasks of a task
#[utoipa::path(
    get,
    path = "/{id}/subtasks",
    tag = "tasks",
    params(("id" = i32, Path, description = "Parent task ID")),
    responses((status = 200, description = "Subtasks", body = Vec<Task>))
)]
pub async fn get_subtasks<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> TaskResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.get_subtasks(id).await?))
}

/// Set a task's priority
#[utoipa::path(
    put,
    path = "/{id}/priority",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = PriorityUpdate,
    responses(
        (status = 200, description = "Priority updated", body = Task),
        (status = 400, description = "Priority out of range"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn set_priority<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<PriorityUpdate>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .priority
        .set_priority(id, body.priority)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(task))
}

/// A task's priority and its label
#[utoipa::path(
    get,
    path = "/{id}/priority",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Priority", body = PriorityInfo),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_priority<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<PriorityInfo>, AppError> {
    let info = state
        .priority
        .priority_info(id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(info))
}

/// Set a task's due date
#[utoipa::path(
    put,
    path = "/{id}/deadline",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = DeadlineUpdate,
    responses(
        (status = 200, description = "Deadline set", body = Task),
        (status = 400, description = "Unparseable date"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn set_deadline<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<DeadlineUpdate>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .deadline
        .set_deadline(id, &body.due_date)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(task))
}

/// Due date, overdue flag and remaining time of a task
#[utoipa::path(
    get,
    path = "/{id}/deadline",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Deadline", body = DeadlineInfo),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_deadline<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<DeadlineInfo>, AppError> {
    let info = state
        .deadline
        .deadline_info(id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(info))
}

/// Clear a task's due date
#[utoipa::path(
    delete,
    path = "/{id}/deadline",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Deadline removed", body = MessageResponse),
        (status = 404, description = "Task not found")
    )
)]
pub async fn remove_deadline<R: TaskRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .deadline
        .remove_deadline(id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(MessageResponse::ok("Deadline removed successfully")))
}

/// Open tasks past their due date
#[utoipa::path(
    get,
    path = "/overdue/list",
    tag = "tasks",
    responses((status = 200, description = "Overdue tasks", body = Vec<Task>))
)]
pub async fn overdue_tasks<R: TaskRepository>(
    State(state): SharedState<R>,
) -> TaskResult<Json<Vec<Task>>> {
    Ok(Json(state.deadline.overdue_tasks().await?))
}

/// Open tasks due within the next `days` days, soonest first
#[utoipa::path(
    get,
    path = "/upcoming/list",
    tag = "tasks",
    params(UpcomingQuery),
    responses((status = 200, description = "Upcoming tasks", body = Vec<Task>))
)]
pub async fn upcoming_deadlines<R: TaskRepository>(
    State(state): SharedState<R>,
    Query(query): Query<UpcomingQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    Ok(Json(state.deadline.upcoming_deadlines(days).await?))
}
