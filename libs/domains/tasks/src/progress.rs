use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskFilter, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub const DEFAULT_INCREMENT: i32 = 10;
pub const MIN_PROGRESS: i32 = 0;
pub const MAX_PROGRESS: i32 = 100;

/// Status implied by moving a task to `progress`, if it changes.
///
/// 100 completes any open task; a partial value only moves a pending task
/// to in-progress. Nothing ever reverts a status.
pub fn derive_status(current: TaskStatus, progress: i32) -> Option<TaskStatus> {
    if progress == MAX_PROGRESS && current != TaskStatus::Completed {
        Some(TaskStatus::Completed)
    } else if progress > MIN_PROGRESS && progress < MAX_PROGRESS && current == TaskStatus::Pending
    {
        Some(TaskStatus::InProgress)
    } else {
        None
    }
}

/// Aggregate over a (possibly status-filtered) set of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProgressStats {
    pub total_tasks: usize,
    pub average_progress: f64,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub pending_tasks: usize,
}

impl ProgressStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

        let average_progress = if tasks.is_empty() {
            0.0
        } else {
            let sum: i64 = tasks.iter().map(|t| i64::from(t.progress)).sum();
            sum as f64 / tasks.len() as f64
        };

        Self {
            total_tasks: tasks.len(),
            average_progress,
            completed_tasks: count(TaskStatus::Completed),
            in_progress_tasks: count(TaskStatus::InProgress),
            pending_tasks: count(TaskStatus::Pending),
        }
    }
}

/// Progress tracking; writes go through [`TaskService::update_task`]
pub struct ProgressService<R: TaskRepository> {
    tasks: TaskService<R>,
}

impl<R: TaskRepository> Clone for ProgressService<R> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
        }
    }
}

impl<R: TaskRepository> ProgressService<R> {
    pub fn new(tasks: TaskService<R>) -> Self {
        Self { tasks }
    }

    /// Store `progress` and advance the status accordingly
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn set_progress(&self, task_id: i32, progress: i32) -> TaskResult<Task> {
        if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
            return Err(TaskError::Validation(format!(
                "Progress must be between {MIN_PROGRESS} and {MAX_PROGRESS}, got {progress}"
            )));
        }

        let task = self
            .tasks
            .get_task(task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id))?;

        let status = derive_status(task.status, progress);
        if let Some(status) = status {
            tracing::debug!(from = %task.status, to = %status, "Status follows progress");
        }

        self.tasks
            .update_task(
                task_id,
                UpdateTask {
                    progress: Some(progress),
                    status,
                    ..Default::default()
                },
            )
            .await?
            .ok_or(TaskError::NotFound(task_id))
    }

    /// Add `increment` (may be negative); the result is clamped to 0..=100
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn increment_progress(&self, task_id: i32, increment: i32) -> TaskResult<Task> {
        let task = self
            .tasks
            .get_task(task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id))?;

        let progress = task
            .progress
            .saturating_add(increment)
            .clamp(MIN_PROGRESS, MAX_PROGRESS);

        self.set_progress(task_id, progress).await
    }

    pub async fn get_progress(&self, task_id: i32) -> TaskResult<Option<i32>> {
        Ok(self.tasks.get_task(task_id).await?.map(|task| task.progress))
    }

    /// Tasks with progress in `[min, max]`; an inverted range is simply empty
    pub async fn tasks_by_progress(&self, min: i32, max: i32) -> TaskResult<Vec<Task>> {
        self.tasks
            .list_tasks(TaskFilter {
                min_progress: Some(min),
                max_progress: Some(max),
                ..Default::default()
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn calculate_overall_progress(
        &self,
        status: Option<TaskStatus>,
    ) -> TaskResult<ProgressStats> {
        let tasks = self
            .tasks
            .list_tasks(TaskFilter {
                status,
                ..Default::default()
            })
            .await?;

        Ok(ProgressStats::from_tasks(&tasks))
    }
}
