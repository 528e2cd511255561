use crate::models::TaskStatus;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub priority: i32,
    pub due_date: Option<DateTimeUtc>,
    pub status: TaskStatus,
    pub progress: i32,
    pub parent_task_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentTaskId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority: model.priority,
            due_date: model.due_date,
            status: model.status,
            progress: model.progress,
            parent_task_id: model.parent_task_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<crate::models::CreateTask> for ActiveModel {
    fn from(input: crate::models::CreateTask) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            priority: Set(input.priority),
            due_date: Set(input.due_date),
            status: Set(input.status),
            progress: Set(input.progress),
            parent_task_id: Set(input.parent_task_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Every column set from the domain value, ready for `update`
impl From<crate::models::Task> for ActiveModel {
    fn from(task: crate::models::Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            priority: Set(task.priority),
            due_date: Set(task.due_date),
            status: Set(task.status),
            progress: Set(task.progress),
            parent_task_id: Set(task.parent_task_id),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
        }
    }
}
