use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::deadline::parse_due_date;

pub const DEFAULT_PRIORITY: i32 = 3;

/// Task lifecycle, partly derived from progress
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// 1 (highest) to 5 (lowest)
    pub priority: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    /// Completion percentage, 0 to 100
    pub progress: i32,
    pub parent_task_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Overwrite every supplied field and refresh `updated_at`.
    ///
    /// Status is copied as given; it is not re-derived from progress.
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
        if let Some(parent_task_id) = update.parent_task_id {
            self.parent_task_id = parent_task_id;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_root(&self) -> bool {
        self.parent_task_id.is_none()
    }
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    #[validate(range(min = 1, max = 5))]
    pub priority: i32,
    /// ISO-8601; a value without offset is read as UTC
    #[serde(default, deserialize_with = "due_date_format::option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub progress: i32,
    #[serde(default)]
    pub parent_task_id: Option<i32>,
}

impl CreateTask {
    /// A pending task with default priority and no progress
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: DEFAULT_PRIORITY,
            due_date: None,
            status: TaskStatus::default(),
            progress: 0,
            parent_task_id: None,
        }
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// DTO for updating an existing task.
///
/// Absent fields are left alone. For the nullable columns an explicit
/// `null` clears the value.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, Default)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[validate(range(min = 1, max = 5))]
    pub priority: Option<i32>,
    #[serde(default, deserialize_with = "due_date_format::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<TaskStatus>,
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_task_id: Option<Option<i32>>,
}

impl UpdateTask {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.progress.is_none()
            && self.parent_task_id.is_none()
    }
}

/// Repository-level filter; every set field narrows the result (AND)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<i32>,
    /// Only tasks without a parent
    pub root_only: bool,
    pub parent_task_id: Option<i32>,
    pub min_progress: Option<i32>,
    pub max_progress: Option<i32>,
    pub has_due_date: Option<bool>,
    pub exclude_status: Option<TaskStatus>,
}

/// Query string accepted by `GET /tasks`
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<i32>,
    #[serde(default)]
    pub root_only: bool,
}

impl From<TaskListQuery> for TaskFilter {
    fn from(query: TaskListQuery) -> Self {
        Self {
            status: query.status,
            priority: query.priority,
            root_only: query.root_only,
            ..Default::default()
        }
    }
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

mod due_date_format {
    use super::*;
    use serde::de::Error;

    pub fn option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_due_date(&raw).map_err(D::Error::custom))
            .transpose()
    }

    pub fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        option(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Task {
            id: 1,
            title: "Write report".into(),
            description: Some("quarterly".into()),
            priority: 3,
            due_date: Some(ts),
            status: TaskStatus::Pending,
            progress: 0,
            parent_task_id: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_create_task_defaults() {
        let input: CreateTask = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(input.priority, DEFAULT_PRIORITY);
        assert_eq!(input.progress, 0);
        assert_eq!(input.status, TaskStatus::Pending);
        assert!(input.due_date.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_task_validation() {
        let mut input = CreateTask::titled("");
        assert!(input.validate().is_err());

        input.title = "x".repeat(256);
        assert!(input.validate().is_err());

        input.title = "ok".into();
        input.priority = 6;
        assert!(input.validate().is_err());

        input.priority = 1;
        input.progress = 101;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_task_accepts_naive_due_date() {
        let input: CreateTask =
            serde_json::from_str(r#"{"title": "t", "due_date": "2099-01-01T00:00:00"}"#).unwrap();
        assert_eq!(
            input.due_date,
            Some(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_create_task_rejects_bad_due_date() {
        let result: Result<CreateTask, _> =
            serde_json::from_str(r#"{"title": "t", "due_date": "next tuesday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_task_distinguishes_null_from_absent() {
        let update: UpdateTask = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(update.due_date, Some(None));
        assert!(update.description.is_none());
        assert!(!update.is_empty());

        let update: UpdateTask = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_apply_update_touches_only_supplied_fields() {
        let mut task = sample_task();
        let before = task.updated_at;

        task.apply_update(UpdateTask {
            progress: Some(100),
            ..Default::default()
        });

        assert_eq!(task.progress, 100);
        // raw setter: status is not derived here
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description.as_deref(), Some("quarterly"));
        assert!(task.updated_at > before);
    }

    #[test]
    fn test_apply_update_clears_nullable_fields() {
        let mut task = sample_task();
        task.apply_update(UpdateTask {
            due_date: Some(None),
            description: Some(None),
            ..Default::default()
        });
        assert!(task.due_date.is_none());
        assert!(task.description.is_none());
    }

    #[test]
    fn test_list_query_into_filter() {
        let filter: TaskFilter = TaskListQuery {
            status: Some(TaskStatus::Pending),
            priority: Some(2),
            root_only: true,
        }
        .into();
        assert_eq!(filter.status, Some(TaskStatus::Pending));
        assert_eq!(filter.priority, Some(2));
        assert!(filter.root_only);
        assert!(filter.min_progress.is_none());
    }
}
