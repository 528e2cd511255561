use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_tasks::entity as task_entity;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::ReminderResult,
    models::{CreateReminder, Reminder, UpdateReminder},
    repository::ReminderRepository,
};

#[derive(Clone)]
pub struct SqlReminderRepository {
    db: DatabaseConnection,
}

impl SqlReminderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReminderRepository for SqlReminderRepository {
    async fn create(&self, input: CreateReminder) -> ReminderResult<Reminder> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(reminder_id = %model.id, task_id = %model.task_id, "Created reminder");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ReminderResult<Option<Reminder>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ReminderResult<Vec<Reminder>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_task(&self, task_id: i32) -> ReminderResult<Vec<Reminder>> {
        let models = entity::Entity::find()
            .filter(entity::Column::TaskId.eq(task_id))
            .order_by_asc(entity::Column::RemindAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_pending(&self, now: DateTime<Utc>) -> ReminderResult<Vec<Reminder>> {
        let models = entity::Entity::find()
            .filter(entity::Column::IsNotified.eq(false))
            .filter(entity::Column::RemindAt.lte(now))
            .order_by_asc(entity::Column::RemindAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateReminder) -> ReminderResult<Option<Reminder>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut reminder: Reminder = model.into();
        reminder.apply_update(input);

        let active_model: entity::ActiveModel = reminder.into();
        let updated = active_model.update(&self.db).await?;

        tracing::info!(reminder_id = %id, "Updated reminder");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> ReminderResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(reminder_id = %id, "Deleted reminder");
        }
        Ok(result.rows_affected > 0)
    }

    async fn task_exists(&self, task_id: i32) -> ReminderResult<bool> {
        let task = task_entity::Entity::find_by_id(task_id).one(&self.db).await?;
        Ok(task.is_some())
    }
}
