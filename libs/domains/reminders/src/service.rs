use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ReminderError, ReminderResult};
use crate::models::{CreateReminder, Reminder, UpdateReminder};
use crate::repository::ReminderRepository;

/// Service layer for Reminder business logic
pub struct ReminderService<R: ReminderRepository> {
    repository: Arc<R>,
}

impl<R: ReminderRepository> Clone for ReminderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ReminderRepository> ReminderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Schedule a reminder for an existing task
    #[instrument(skip(self, input), fields(task_id = %input.task_id))]
    pub async fn create_reminder(&self, input: CreateReminder) -> ReminderResult<Reminder> {
        if !self.repository.task_exists(input.task_id).await? {
            return Err(ReminderError::Validation(format!(
                "Task with id {} not found",
                input.task_id
            )));
        }

        self.repository.create(input).await
    }

    pub async fn get_reminder(&self, id: i32) -> ReminderResult<Option<Reminder>> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_reminders(&self) -> ReminderResult<Vec<Reminder>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input), fields(reminder_id = %id))]
    pub async fn update_reminder(
        &self,
        id: i32,
        input: UpdateReminder,
    ) -> ReminderResult<Option<Reminder>> {
        self.repository.update(id, input).await
    }

    #[instrument(skip(self), fields(reminder_id = %id))]
    pub async fn delete_reminder(&self, id: i32) -> ReminderResult<bool> {
        self.repository.delete(id).await
    }

    /// Due reminders that have not been delivered yet
    pub async fn get_pending(&self) -> ReminderResult<Vec<Reminder>> {
        self.get_pending_at(Utc::now()).await
    }

    pub async fn get_pending_at(&self, now: DateTime<Utc>) -> ReminderResult<Vec<Reminder>> {
        self.repository.list_pending(now).await
    }

    /// False when the reminder does not exist. Marking twice is a no-op.
    #[instrument(skip(self), fields(reminder_id = %id))]
    pub async fn mark_notified(&self, id: i32) -> ReminderResult<bool> {
        let Some(reminder) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };
        if reminder.is_notified {
            return Ok(true);
        }

        let update = UpdateReminder {
            is_notified: Some(true),
            ..Default::default()
        };
        Ok(self.repository.update(id, update).await?.is_some())
    }

    pub async fn get_by_task(&self, task_id: i32) -> ReminderResult<Vec<Reminder>> {
        self.repository.list_by_task(task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockReminderRepository;
    use mockall::predicate::*;

    fn reminder(id: i32, is_notified: bool) -> Reminder {
        Reminder {
            id,
            task_id: 1,
            remind_at: Utc::now(),
            is_notified,
        }
    }

    #[tokio::test]
    async fn test_create_for_missing_task_is_validation_error() {
        let mut mock = MockReminderRepository::new();
        mock.expect_task_exists()
            .with(eq(42))
            .returning(|_| Ok(false));
        mock.expect_create().never();

        let service = ReminderService::new(mock);
        let err = service
            .create_reminder(CreateReminder {
                task_id: 42,
                remind_at: Utc::now(),
            })
            .await
            .unwrap_err();

        match err {
            ReminderError::Validation(msg) => assert_eq!(msg, "Task with id 42 not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mark_notified_missing_is_false() {
        let mut mock = MockReminderRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));
        mock.expect_update().never();

        let service = ReminderService::new(mock);
        assert!(!service.mark_notified(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_notified_twice_skips_write() {
        let mut mock = MockReminderRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Ok(Some(reminder(id, true))));
        mock.expect_update().never();

        let service = ReminderService::new(mock);
        assert!(service.mark_notified(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_notified_sets_flag() {
        let mut mock = MockReminderRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Ok(Some(reminder(id, false))));
        mock.expect_update()
            .withf(|id, update| *id == 3 && update.is_notified == Some(true) && update.remind_at.is_none())
            .times(1)
            .returning(|id, _| Ok(Some(reminder(id, true))));

        let service = ReminderService::new(mock);
        assert!(service.mark_notified(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_pending_uses_given_instant() {
        let now = Utc::now();
        let mut mock = MockReminderRepository::new();
        mock.expect_list_pending()
            .with(eq(now))
            .returning(|_| Ok(Vec::new()));

        let service = ReminderService::new(mock);
        assert!(service.get_pending_at(now).await.unwrap().is_empty());
    }
}
