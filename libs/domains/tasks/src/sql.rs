use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Task, TaskFilter, UpdateTask},
    repository::TaskRepository,
};

/// sea-orm backed repository (PostgreSQL or SQLite)
#[derive(Clone)]
pub struct SqlTaskRepository {
    db: DatabaseConnection,
}

impl SqlTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: sea_orm::DbErr) -> TaskError {
    TaskError::Database(e.to_string())
}

#[async_trait]
impl TaskRepository for SqlTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(task_id = %model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let mut query = entity::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        if let Some(priority) = filter.priority {
            query = query.filter(entity::Column::Priority.eq(priority));
        }

        if filter.root_only {
            query = query.filter(entity::Column::ParentTaskId.is_null());
        }

        if let Some(parent_id) = filter.parent_task_id {
            query = query.filter(entity::Column::ParentTaskId.eq(parent_id));
        }

        if let Some(min) = filter.min_progress {
            query = query.filter(entity::Column::Progress.gte(min));
        }

        if let Some(max) = filter.max_progress {
            query = query.filter(entity::Column::Progress.lte(max));
        }

        match filter.has_due_date {
            Some(true) => query = query.filter(entity::Column::DueDate.is_not_null()),
            Some(false) => query = query.filter(entity::Column::DueDate.is_null()),
            None => {}
        }

        if let Some(status) = filter.exclude_status {
            query = query.filter(entity::Column::Status.ne(status));
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateTask) -> TaskResult<Option<Task>> {
        let Some(model) = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let mut task: Task = model.into();
        task.apply_update(input);

        let active_model: entity::ActiveModel = task.into();
        let updated_model = active_model.update(&self.db).await.map_err(db_error)?;

        tracing::info!(task_id = %id, "Updated task");
        Ok(Some(updated_model.into()))
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // Orphaned subtasks become root tasks
        let detached = entity::Entity::update_many()
            .col_expr(entity::Column::ParentTaskId, Expr::value(Option::<i32>::None))
            .filter(entity::Column::ParentTaskId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        let result = entity::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(
                task_id = %id,
                detached_subtasks = detached.rows_affected,
                "Deleted task"
            );
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
