use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{AppError, JsonBody, MessageResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ReminderError, ReminderResult};
use crate::models::{CreateReminder, Reminder, UpdateReminder};
use crate::repository::ReminderRepository;
use crate::service::ReminderService;

/// OpenAPI documentation for the `/reminders` routes
#[derive(OpenApi)]
#[openapi(
    paths(
        list_reminders,
        create_reminder,
        get_pending,
        get_reminder,
        update_reminder,
        delete_reminder,
        mark_notified,
        get_by_task,
    ),
    components(schemas(Reminder, CreateReminder, UpdateReminder, MessageResponse)),
    tags((name = "reminders", description = "Task reminders"))
)]
pub struct ApiDoc;

pub fn router<R: ReminderRepository + 'static>(service: ReminderService<R>) -> Router {
    Router::new()
        .route("/", get(list_reminders).post(create_reminder))
        .route("/pending", get(get_pending))
        .route(
            "/{id}",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .route("/{id}/notify", post(mark_notified))
        .route("/task/{task_id}", get(get_by_task))
        .with_state(Arc::new(service))
}

fn not_found(id: i32) -> AppError {
    ReminderError::NotFound(id).into()
}

#[utoipa::path(
    get,
    path = "",
    tag = "reminders",
    responses((status = 200, description = "All reminders", body = Vec<Reminder>))
)]
pub async fn list_reminders<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
) -> ReminderResult<Json<Vec<Reminder>>> {
    Ok(Json(service.list_reminders().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = "reminders",
    request_body = CreateReminder,
    responses(
        (status = 201, description = "Reminder scheduled", body = Reminder),
        (status = 400, description = "Task does not exist")
    )
)]
pub async fn create_reminder<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
    JsonBody(input): JsonBody<CreateReminder>,
) -> ReminderResult<impl IntoResponse> {
    let reminder = service.create_reminder(input).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

#[utoipa::path(
    get,
    path = "/pending",
    tag = "reminders",
    responses((status = 200, description = "Due, undelivered reminders", body = Vec<Reminder>))
)]
pub async fn get_pending<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
) -> ReminderResult<Json<Vec<Reminder>>> {
    Ok(Json(service.get_pending().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "reminders",
    params(("id" = i32, Path, description = "Reminder ID")),
    responses(
        (status = 200, description = "Reminder found", body = Reminder),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn get_reminder<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<Reminder>, AppError> {
    service
        .get_reminder(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "reminders",
    params(("id" = i32, Path, description = "Reminder ID")),
    request_body = UpdateReminder,
    responses(
        (status = 200, description = "Reminder updated", body = Reminder),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn update_reminder<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
    Path(id): Path<i32>,
    JsonBody(input): JsonBody<UpdateReminder>,
) -> Result<Json<Reminder>, AppError> {
    service
        .update_reminder(id, input)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "reminders",
    params(("id" = i32, Path, description = "Reminder ID")),
    responses(
        (status = 200, description = "Reminder deleted", body = MessageResponse),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn delete_reminder<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.delete_reminder(id).await? {
        return Err(not_found(id));
    }
    Ok(Json(MessageResponse::ok("Reminder deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/{id}/notify",
    tag = "reminders",
    params(("id" = i32, Path, description = "Reminder ID")),
    responses(
        (status = 200, description = "Reminder marked as notified", body = MessageResponse),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn mark_notified<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.mark_notified(id).await? {
        return Err(not_found(id));
    }
    Ok(Json(MessageResponse::ok("Reminder marked as notified")))
}

#[utoipa::path(
    get,
    path = "/task/{task_id}",
    tag = "reminders",
    params(("task_id" = i32, Path, description = "Task ID")),
    responses((status = 200, description = "Reminders for the task", body = Vec<Reminder>))
)]
pub async fn get_by_task<R: ReminderRepository>(
    State(service): State<Arc<ReminderService<R>>>,
    Path(task_id): Path<i32>,
) -> ReminderResult<Json<Vec<Reminder>>> {
    Ok(Json(service.get_by_task(task_id).await?))
}
