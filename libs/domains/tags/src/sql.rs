use async_trait::async_trait;
use domain_tasks::{Task, entity as task_entity};
use sea_orm::sea_query::{OnConflict, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    entity,
    error::{TagError, TagResult},
    models::{CreateTag, Tag, UpdateTag},
    repository::TagRepository,
    task_tag,
};

#[derive(Clone)]
pub struct SqlTagRepository {
    db: DatabaseConnection,
}

impl SqlTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn both_exist(&self, tag_id: i32, task_id: i32) -> TagResult<bool> {
        let tag = entity::Entity::find_by_id(tag_id).one(&self.db).await?;
        let task = task_entity::Entity::find_by_id(task_id).one(&self.db).await?;
        Ok(tag.is_some() && task.is_some())
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn create(&self, input: CreateTag) -> TagResult<Tag> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| TagError::from_write(e, &name))?;

        tracing::info!(tag_id = %model.id, "Created tag");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> TagResult<Option<Tag>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> TagResult<Option<Tag>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> TagResult<Vec<Tag>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateTag) -> TagResult<Option<Tag>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.name = Set(input.name.clone());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| TagError::from_write(e, &input.name))?;

        tracing::info!(tag_id = %id, "Renamed tag");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> TagResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(tag_id = %id, "Deleted tag");
        }
        Ok(result.rows_affected > 0)
    }

    async fn assign_task(&self, tag_id: i32, task_id: i32) -> TagResult<bool> {
        if !self.both_exist(tag_id, task_id).await? {
            return Ok(false);
        }

        let inserted = task_tag::Entity::insert(task_tag::ActiveModel {
            task_id: Set(task_id),
            tag_id: Set(tag_id),
        })
        .on_conflict(
            OnConflict::columns([task_tag::Column::TaskId, task_tag::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await?;

        if inserted > 0 {
            tracing::info!(tag_id = %tag_id, task_id = %task_id, "Tagged task");
        }

        Ok(true)
    }

    async fn unassign_task(&self, tag_id: i32, task_id: i32) -> TagResult<bool> {
        if !self.both_exist(tag_id, task_id).await? {
            return Ok(false);
        }

        task_tag::Entity::delete_many()
            .filter(task_tag::Column::TagId.eq(tag_id))
            .filter(task_tag::Column::TaskId.eq(task_id))
            .exec(&self.db)
            .await?;

        Ok(true)
    }

    async fn tasks_for_tag(&self, tag_id: i32) -> TagResult<Vec<Task>> {
        let tagged = Query::select()
            .column(task_tag::Column::TaskId)
            .from(task_tag::Entity)
            .and_where(task_tag::Column::TagId.eq(tag_id))
            .to_owned();

        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Id.in_subquery(tagged))
            .order_by_asc(task_entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
