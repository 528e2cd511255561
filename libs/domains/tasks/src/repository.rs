use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, TaskFilter, UpdateTask};

/// Repository trait for Task persistence.
///
/// Absent rows come back as `None`/`false`, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Tasks matching every set field of `filter`, oldest first
    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>>;

    /// Apply the supplied fields; `None` when the task does not exist
    async fn update(&self, id: i32, input: UpdateTask) -> TaskResult<Option<Task>>;

    /// Delete the task and detach its direct subtasks
    async fn delete(&self, id: i32) -> TaskResult<bool>;
}
