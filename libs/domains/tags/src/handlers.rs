use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{AppError, JsonBody, MessageResponse};
use domain_tasks::Task;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TagError, TagResult};
use crate::models::{CreateTag, Tag, UpdateTag};
use crate::repository::TagRepository;
use crate::service::TagService;

fn tag_not_found(id: i32) -> AppError {
    TagError::NotFound(id).into()
}

/// OpenAPI documentation for the `/tags` routes
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tags,
        create_tag,
        get_tag,
        update_tag,
        delete_tag,
        assign_to_task,
        unassign_from_task,
        get_tasks_by_tag,
    ),
    components(schemas(Tag, CreateTag, UpdateTag, MessageResponse)),
    tags((name = "tags", description = "Task tags"))
)]
pub struct ApiDoc;

pub fn router<R: TagRepository + 'static>(service: TagService<R>) -> Router {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/{id}", get(get_tag).put(update_tag).delete(delete_tag))
        .route("/{id}/tasks", get(get_tasks_by_tag))
        .route(
            "/{id}/tasks/{task_id}",
            post(assign_to_task).delete(unassign_from_task),
        )
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "",
    tag = "tags",
    responses((status = 200, description = "All tags", body = Vec<Tag>))
)]
pub async fn list_tags<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
) -> TagResult<Json<Vec<Tag>>> {
    Ok(Json(service.list_tags().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = "tags",
    request_body = CreateTag,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    JsonBody(input): JsonBody<CreateTag>,
) -> TagResult<impl IntoResponse> {
    let tag = service.create_tag(input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag found", body = Tag),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<Tag>, AppError> {
    service
        .get_tag(id)
        .await?
        .map(Json)
        .ok_or_else(|| tag_not_found(id))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag ID")),
    request_body = UpdateTag,
    responses(
        (status = 200, description = "Tag renamed", body = Tag),
        (status = 404, description = "Tag not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Path(id): Path<i32>,
    JsonBody(input): JsonBody<UpdateTag>,
) -> Result<Json<Tag>, AppError> {
    service
        .update_tag(id, input)
        .await?
        .map(Json)
        .ok_or_else(|| tag_not_found(id))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag deleted", body = MessageResponse),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.delete_tag(id).await? {
        return Err(tag_not_found(id));
    }
    Ok(Json(MessageResponse::ok("Tag deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/{id}/tasks/{task_id}",
    tag = "tags",
    params(
        ("id" = i32, Path, description = "Tag ID"),
        ("task_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Tag assigned", body = MessageResponse),
        (status = 404, description = "Tag or task not found")
    )
)]
pub async fn assign_to_task<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Path((id, task_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.assign_to_task(id, task_id).await? {
        return Err(AppError::NotFound("Tag or Task not found".to_string()));
    }
    Ok(Json(MessageResponse::ok("Tag assigned to task successfully")))
}

#[utoipa::path(
    delete,
    path = "/{id}/tasks/{task_id}",
    tag = "tags",
    params(
        ("id" = i32, Path, description = "Tag ID"),
        ("task_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Tag unassigned", body = MessageResponse),
        (status = 404, description = "Tag or task not found")
    )
)]
pub async fn unassign_from_task<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Path((id, task_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.unassign_from_task(id, task_id).await? {
        return Err(AppError::NotFound("Tag or Task not found".to_string()));
    }
    Ok(Json(MessageResponse::ok("Tag unassigned from task successfully")))
}

#[utoipa::path(
    get,
    path = "/{id}/tasks",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag ID")),
    responses((status = 200, description = "Tasks with the tag", body = Vec<Task>))
)]
pub async fn get_tasks_by_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    Path(id): Path<i32>,
) -> TagResult<Json<Vec<Task>>> {
    Ok(Json(service.get_tasks_by_tag(id).await?))
}
