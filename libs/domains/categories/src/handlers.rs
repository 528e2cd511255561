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

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

type SharedService<R> = State<Arc<CategoryService<R>>>;

fn category_not_found(id: i32) -> AppError {
    CategoryError::NotFound(id).into()
}

/// OpenAPI documentation for the `/categories` routes
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
        assign_to_task,
        unassign_from_task,
        get_tasks_by_category,
    ),
    components(schemas(Category, CreateCategory, UpdateCategory, MessageResponse)),
    tags((name = "categories", description = "Task categories"))
)]
pub struct ApiDoc;

/// Routes mounted at `/categories`
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/{id}/tasks", get(get_tasks_by_category))
        .route(
            "/{id}/tasks/{task_id}",
            post(assign_to_task).delete(unassign_from_task),
        )
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    responses((status = 200, description = "All categories", body = Vec<Category>))
)]
pub async fn list_categories<R: CategoryRepository>(
    State(service): SharedService<R>,
) -> CategoryResult<Json<Vec<Category>>> {
    Ok(Json(service.list_categories().await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_category<R: CategoryRepository>(
    State(service): SharedService<R>,
    JsonBody(input): JsonBody<CreateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category<R: CategoryRepository>(
    State(service): SharedService<R>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, AppError> {
    let category = service
        .get_category(id)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_category<R: CategoryRepository>(
    State(service): SharedService<R>,
    Path(id): Path<i32>,
    JsonBody(input): JsonBody<UpdateCategory>,
) -> Result<Json<Category>, AppError> {
    let category = service
        .update_category(id, input)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category<R: CategoryRepository>(
    State(service): SharedService<R>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.delete_category(id).await? {
        return Err(category_not_found(id));
    }
    Ok(Json(MessageResponse::ok("Category deleted successfully")))
}

/// Attach a category to a task (no-op if already attached)
#[utoipa::path(
    post,
    path = "/{id}/tasks/{task_id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID"),
        ("task_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Category assigned", body = MessageResponse),
        (status = 404, description = "Category or task not found")
    )
)]
pub async fn assign_to_task<R: CategoryRepository>(
    State(service): SharedService<R>,
    Path((id, task_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.assign_to_task(id, task_id).await? {
        return Err(AppError::NotFound("Category or Task not found".to_string()));
    }
    Ok(Json(MessageResponse::ok("Category assigned to task successfully")))
}

#[utoipa::path(
    delete,
    path = "/{id}/tasks/{task_id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "Category ID"),
        ("task_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Category unassigned", body = MessageResponse),
        (status = 404, description = "Category or task not found")
    )
)]
pub async fn unassign_from_task<R: CategoryRepository>(
    State(service): SharedService<R>,
    Path((id, task_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, AppError> {
    if !service.unassign_from_task(id, task_id).await? {
        return Err(AppError::NotFound("Category or Task not found".to_string()));
    }
    Ok(Json(MessageResponse::ok(
        "Category unassigned from task successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/{id}/tasks",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Tasks in the category", body = Vec<Task>))
)]
pub async fn get_tasks_by_category<R: CategoryRepository>(
    State(service): SharedService<R>,
    Path(id): Path<i32>,
) -> CategoryResult<Json<Vec<Task>>> {
    Ok(Json(service.get_tasks_by_category(id).await?))
}
