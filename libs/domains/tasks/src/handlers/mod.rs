mod progress;
mod tasks;

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::deadline::{DeadlineInfo, DeadlineService, TimeRemaining};
use crate::models::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::priority::{PriorityInfo, PriorityService};
use crate::progress::{ProgressService, ProgressStats};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub use progress::{ProgressResponse, ProgressUpdate};
pub use tasks::{DeadlineUpdate, PriorityUpdate};

/// The task-side services, all sharing one repository
pub struct TasksState<R: TaskRepository> {
    pub tasks: TaskService<R>,
    pub priority: PriorityService<R>,
    pub deadline: DeadlineService<R>,
    pub progress: ProgressService<R>,
}

impl<R: TaskRepository> TasksState<R> {
    pub fn new(tasks: TaskService<R>) -> Self {
        Self {
            priority: PriorityService::new(tasks.clone()),
            deadline: DeadlineService::new(tasks.clone()),
            progress: ProgressService::new(tasks.clone()),
            tasks,
        }
    }
}

/// OpenAPI documentation for the `/tasks` routes
#[derive(OpenApi)]
#[openapi(
    paths(
        tasks::list_tasks,
        tasks::create_task,
        tasks::get_task,
        tasks::update_task,
        tasks::delete_task,
        tasks::add_subtask,
        tasks::get_subtasks,
        tasks::set_priority,
        tasks::get_priority,
        tasks::set_deadline,
        tasks::get_deadline,
        tasks::remove_deadline,
        tasks::overdue_tasks,
        tasks::upcoming_deadlines,
    ),
    components(schemas(
        Task,
        TaskStatus,
        CreateTask,
        UpdateTask,
        PriorityUpdate,
        PriorityInfo,
        DeadlineUpdate,
        DeadlineInfo,
        TimeRemaining,
        axum_helpers::MessageResponse,
    )),
    tags((name = "tasks", description = "Task management, priority and deadlines"))
)]
pub struct TasksApiDoc;

/// OpenAPI documentation for the `/progress` routes
#[derive(OpenApi)]
#[openapi(
    paths(
        progress::set_progress,
        progress::get_progress,
        progress::increment_progress,
        progress::tasks_by_progress,
        progress::progress_stats,
    ),
    components(schemas(ProgressUpdate, ProgressResponse, ProgressStats)),
    tags((name = "progress", description = "Task progress tracking"))
)]
pub struct ProgressApiDoc;

/// Routes mounted at `/tasks`
pub fn router<R: TaskRepository + 'static>(state: Arc<TasksState<R>>) -> Router {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/overdue/list", get(tasks::overdue_tasks))
        .route("/upcoming/list", get(tasks::upcoming_deadlines))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/{id}/subtasks",
            post(tasks::add_subtask).get(tasks::get_subtasks),
        )
        .route(
            "/{id}/priority",
            put(tasks::set_priority).get(tasks::get_priority),
        )
        .route(
            "/{id}/deadline",
            put(tasks::set_deadline)
                .get(tasks::get_deadline)
                .delete(tasks::remove_deadline),
        )
        .with_state(state)
}

/// Routes mounted at `/progress`
pub fn progress_router<R: TaskRepository + 'static>(state: Arc<TasksState<R>>) -> Router {
    Router::new()
        .route("/stats", get(progress::progress_stats))
        .route("/tasks/range/list", get(progress::tasks_by_progress))
        .route(
            "/tasks/{id}",
            put(progress::set_progress).get(progress::get_progress),
        )
        .route("/tasks/{id}/increment", post(progress::increment_progress))
        .with_state(state)
}
