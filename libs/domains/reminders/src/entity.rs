use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CreateReminder, Reminder};

/// Sea-ORM Entity for the reminders table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub task_id: i32,
    pub remind_at: DateTimeUtc,
    pub is_notified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_tasks::entity::Entity",
        from = "Column::TaskId",
        to = "domain_tasks::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Task,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reminder {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            remind_at: model.remind_at,
            is_notified: model.is_notified,
        }
    }
}

impl From<CreateReminder> for ActiveModel {
    fn from(input: CreateReminder) -> Self {
        ActiveModel {
            id: NotSet,
            task_id: Set(input.task_id),
            remind_at: Set(input.remind_at),
            is_notified: Set(false),
        }
    }
}

impl From<Reminder> for ActiveModel {
    fn from(reminder: Reminder) -> Self {
        ActiveModel {
            id: Set(reminder.id),
            task_id: Set(reminder.task_id),
            remind_at: Set(reminder.remind_at),
            is_notified: Set(reminder.is_notified),
        }
    }
}
