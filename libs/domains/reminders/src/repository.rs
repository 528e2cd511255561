use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ReminderResult;
use crate::models::{CreateReminder, Reminder, UpdateReminder};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn create(&self, input: CreateReminder) -> ReminderResult<Reminder>;

    async fn get_by_id(&self, id: i32) -> ReminderResult<Option<Reminder>>;

    async fn list(&self) -> ReminderResult<Vec<Reminder>>;

    async fn list_by_task(&self, task_id: i32) -> ReminderResult<Vec<Reminder>>;

    /// Unnotified reminders with `remind_at <= now`, earliest first
    async fn list_pending(&self, now: DateTime<Utc>) -> ReminderResult<Vec<Reminder>>;

    async fn update(&self, id: i32, input: UpdateReminder) -> ReminderResult<Option<Reminder>>;

    async fn delete(&self, id: i32) -> ReminderResult<bool>;

    async fn task_exists(&self, task_id: i32) -> ReminderResult<bool>;
}
