use async_trait::async_trait;
use domain_tasks::Task;
use sea_orm::sea_query::{OnConflict, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, CreateCategory, UpdateCategory},
    repository::CategoryRepository,
    task_category,
};

use domain_tasks::entity as task_entity;

/// sea-orm backed repository (PostgreSQL or SQLite)
#[derive(Clone)]
pub struct SqlCategoryRepository {
    db: DatabaseConnection,
}

impl SqlCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn both_exist(&self, category_id: i32, task_id: i32) -> CategoryResult<bool> {
        let category = entity::Entity::find_by_id(category_id).one(&self.db).await?;
        let task = task_entity::Entity::find_by_id(task_id).one(&self.db).await?;
        Ok(category.is_some() && task.is_some())
    }

}

#[async_trait]
impl CategoryRepository for SqlCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| CategoryError::from_write(e, &name))?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateCategory) -> CategoryResult<Option<Category>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut category: Category = model.into();
        category.apply_update(input);
        let name = category.name.clone();

        let active_model: entity::ActiveModel = category.into();
        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| CategoryError::from_write(e, &name))?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> CategoryResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = %id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn assign_task(&self, category_id: i32, task_id: i32) -> CategoryResult<bool> {
        if !self.both_exist(category_id, task_id).await? {
            return Ok(false);
        }

        let inserted = task_category::Entity::insert(task_category::ActiveModel {
            task_id: sea_orm::Set(task_id),
            category_id: sea_orm::Set(category_id),
        })
        .on_conflict(
            OnConflict::columns([
                task_category::Column::TaskId,
                task_category::Column::CategoryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await?;

        if inserted > 0 {
            tracing::info!(category_id = %category_id, task_id = %task_id, "Assigned category");
        }

        Ok(true)
    }

    async fn unassign_task(&self, category_id: i32, task_id: i32) -> CategoryResult<bool> {
        if !self.both_exist(category_id, task_id).await? {
            return Ok(false);
        }

        let result = task_category::Entity::delete_many()
            .filter(task_category::Column::CategoryId.eq(category_id))
            .filter(task_category::Column::TaskId.eq(task_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = %category_id, task_id = %task_id, "Unassigned category");
        }

        Ok(true)
    }

    async fn tasks_for_category(&self, category_id: i32) -> CategoryResult<Vec<Task>> {
        let linked = Query::select()
            .column(task_category::Column::TaskId)
            .from(task_category::Entity)
            .and_where(task_category::Column::CategoryId.eq(category_id))
            .to_owned();

        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Id.in_subquery(linked))
            .order_by_asc(task_entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
