use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskFilter, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// Window used by the upcoming-deadlines query when none is given
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 due date.
///
/// Offsets (including `Z`) are honoured. Timestamps without an offset are
/// read as UTC and a bare date means midnight UTC.
pub fn parse_due_date(raw: &str) -> TaskResult<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TaskError::Validation("due_date is required".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(TaskError::Validation(format!(
        "Invalid date format '{raw}', expected ISO-8601 such as 2025-01-31T17:00:00"
    )))
}

/// Breakdown of the distance between now and a due date.
///
/// `days`, `hours` and `minutes` are calendar-style components of the
/// absolute duration; `total_seconds` is the absolute duration itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeRemaining {
    pub is_overdue: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub total_seconds: i64,
}

pub fn time_remaining(due: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let remaining = due - now;
    let is_overdue = remaining < TimeDelta::zero();
    let total_seconds = remaining.num_seconds().abs();

    TimeRemaining {
        is_overdue,
        days: total_seconds / 86_400,
        hours: (total_seconds % 86_400) / 3_600,
        minutes: (total_seconds % 3_600) / 60,
        total_seconds,
    }
}

/// Single-task check; status is deliberately not consulted here
pub fn is_overdue_at(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    due.is_some_and(|due| now > due)
}

/// Deadline summary for one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeadlineInfo {
    pub task_id: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    pub time_remaining: Option<TimeRemaining>,
}

/// Due-date operations; every write goes through [`TaskService::update_task`]
pub struct DeadlineService<R: TaskRepository> {
    tasks: TaskService<R>,
}

impl<R: TaskRepository> Clone for DeadlineService<R> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
        }
    }
}

impl<R: TaskRepository> DeadlineService<R> {
    pub fn new(tasks: TaskService<R>) -> Self {
        Self { tasks }
    }

    /// Parse `due_date` and store it. `None` when the task does not exist.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn set_deadline(&self, task_id: i32, due_date: &str) -> TaskResult<Option<Task>> {
        let due = parse_due_date(due_date)?;
        self.set_deadline_at(task_id, due).await
    }

    pub async fn set_deadline_at(
        &self,
        task_id: i32,
        due: DateTime<Utc>,
    ) -> TaskResult<Option<Task>> {
        self.tasks
            .update_task(
                task_id,
                UpdateTask {
                    due_date: Some(Some(due)),
                    ..Default::default()
                },
            )
            .await
    }

    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn remove_deadline(&self, task_id: i32) -> TaskResult<Option<Task>> {
        self.tasks
            .update_task(
                task_id,
                UpdateTask {
                    due_date: Some(None),
                    ..Default::default()
                },
            )
            .await
    }

    /// The task's due date; `None` for a missing task or one without a deadline
    pub async fn get_deadline(&self, task_id: i32) -> TaskResult<Option<DateTime<Utc>>> {
        Ok(self
            .tasks
            .get_task(task_id)
            .await?
            .and_then(|task| task.due_date))
    }

    pub async fn is_overdue(&self, task_id: i32) -> TaskResult<bool> {
        let due = self.get_deadline(task_id).await?;
        Ok(is_overdue_at(due, Utc::now()))
    }

    pub async fn overdue_tasks(&self) -> TaskResult<Vec<Task>> {
        self.overdue_tasks_at(Utc::now()).await
    }

    /// Open tasks whose due date lies before `now`
    #[instrument(skip(self))]
    pub async fn overdue_tasks_at(&self, now: DateTime<Utc>) -> TaskResult<Vec<Task>> {
        let tasks = self.open_tasks_with_deadline().await?;

        Ok(tasks
            .into_iter()
            .filter(|task| task.due_date.is_some_and(|due| due < now))
            .collect())
    }

    pub async fn upcoming_deadlines(&self, days: i64) -> TaskResult<Vec<Task>> {
        self.upcoming_deadlines_at(Utc::now(), days).await
    }

    /// Open tasks due within `[now, now + days]`, soonest first
    #[instrument(skip(self))]
    pub async fn upcoming_deadlines_at(
        &self,
        now: DateTime<Utc>,
        days: i64,
    ) -> TaskResult<Vec<Task>> {
        let horizon = TimeDelta::try_days(days)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| TaskError::Validation(format!("days out of range: {days}")))?;

        let mut tasks: Vec<Task> = self
            .open_tasks_with_deadline()
            .await?
            .into_iter()
            .filter(|task| {
                task.due_date
                    .is_some_and(|due| now <= due && due <= horizon)
            })
            .collect();

        tasks.sort_by_key(|task| task.due_date);
        Ok(tasks)
    }

    pub async fn time_remaining(&self, task_id: i32) -> TaskResult<Option<TimeRemaining>> {
        self.time_remaining_at(task_id, Utc::now()).await
    }

    /// `None` for a missing task or one without a deadline
    pub async fn time_remaining_at(
        &self,
        task_id: i32,
        now: DateTime<Utc>,
    ) -> TaskResult<Option<TimeRemaining>> {
        let due = self.get_deadline(task_id).await?;
        Ok(due.map(|due| time_remaining(due, now)))
    }

    /// Combined deadline view; `None` when the task does not exist
    pub async fn deadline_info(&self, task_id: i32) -> TaskResult<Option<DeadlineInfo>> {
        let Some(task) = self.tasks.get_task(task_id).await? else {
            return Ok(None);
        };
        let now = Utc::now();

        Ok(Some(DeadlineInfo {
            task_id: task.id,
            due_date: task.due_date,
            is_overdue: is_overdue_at(task.due_date, now),
            time_remaining: task.due_date.map(|due| time_remaining(due, now)),
        }))
    }

    async fn open_tasks_with_deadline(&self) -> TaskResult<Vec<Task>> {
        self.tasks
            .list_tasks(TaskFilter {
                has_due_date: Some(true),
                exclude_status: Some(TaskStatus::Completed),
                ..Default::default()
            })
            .await
    }
}
