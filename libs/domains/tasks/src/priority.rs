use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskFilter, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// The five priority levels, 1 being the most urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PriorityLevel {
    Highest = 1,
    High = 2,
    Medium = 3,
    Low = 4,
    Lowest = 5,
}

impl PriorityLevel {
    pub fn from_value(value: i32) -> Option<Self> {
        Self::iter().find(|level| level.value() == value)
    }

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityLevel::Highest => "highest",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
            PriorityLevel::Lowest => "lowest",
        }
    }
}

pub fn is_valid_priority(priority: i32) -> bool {
    PriorityLevel::from_value(priority).is_some()
}

pub fn priority_label(priority: i32) -> Option<&'static str> {
    PriorityLevel::from_value(priority).map(PriorityLevel::label)
}

fn check_priority(priority: i32) -> TaskResult<PriorityLevel> {
    PriorityLevel::from_value(priority).ok_or_else(|| {
        TaskError::Validation(format!("Priority must be between 1 and 5, got {priority}"))
    })
}

/// Priority of one task with its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriorityInfo {
    pub priority: i32,
    pub label: String,
}

pub struct PriorityService<R: TaskRepository> {
    tasks: TaskService<R>,
}

impl<R: TaskRepository> Clone for PriorityService<R> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
        }
    }
}

impl<R: TaskRepository> PriorityService<R> {
    pub fn new(tasks: TaskService<R>) -> Self {
        Self { tasks }
    }

    pub fn is_valid_priority(&self, priority: i32) -> bool {
        is_valid_priority(priority)
    }

    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn set_priority(&self, task_id: i32, priority: i32) -> TaskResult<Option<Task>> {
        check_priority(priority)?;

        self.tasks
            .update_task(
                task_id,
                UpdateTask {
                    priority: Some(priority),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn get_priority(&self, task_id: i32) -> TaskResult<Option<i32>> {
        Ok(self.tasks.get_task(task_id).await?.map(|task| task.priority))
    }

    pub fn get_priority_label(&self, priority: i32) -> TaskResult<&'static str> {
        check_priority(priority).map(PriorityLevel::label)
    }

    pub async fn get_task_priority_label(&self, task_id: i32) -> TaskResult<Option<&'static str>> {
        Ok(self
            .get_priority(task_id)
            .await?
            .and_then(priority_label))
    }

    pub async fn get_tasks_by_priority(&self, priority: i32) -> TaskResult<Vec<Task>> {
        check_priority(priority)?;

        self.tasks
            .list_tasks(TaskFilter {
                priority: Some(priority),
                ..Default::default()
            })
            .await
    }

    /// `None` when the task does not exist
    pub async fn priority_info(&self, task_id: i32) -> TaskResult<Option<PriorityInfo>> {
        Ok(self.get_priority(task_id).await?.map(|priority| PriorityInfo {
            priority,
            label: priority_label(priority).unwrap_or("unknown").to_string(),
        }))
    }
}
