use domain_tasks::Task;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TagError, TagResult};
use crate::models::{CreateTag, Tag, UpdateTag};
use crate::repository::TagRepository;

/// Service layer for Tag business logic
pub struct TagService<R: TagRepository> {
    repository: Arc<R>,
}

impl<R: TagRepository> Clone for TagService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(tag_name = %input.name))]
    pub async fn create_tag(&self, input: CreateTag) -> TagResult<Tag> {
        input
            .validate()
            .map_err(|e| TagError::Validation(e.to_string()))?;

        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(TagError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    pub async fn get_tag(&self, id: i32) -> TagResult<Option<Tag>> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_tags(&self) -> TagResult<Vec<Tag>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input), fields(tag_id = %id))]
    pub async fn update_tag(&self, id: i32, input: UpdateTag) -> TagResult<Option<Tag>> {
        input
            .validate()
            .map_err(|e| TagError::Validation(e.to_string()))?;

        if let Some(existing) = self.repository.find_by_name(&input.name).await? {
            if existing.id != id {
                return Err(TagError::DuplicateName(input.name));
            }
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self), fields(tag_id = %id))]
    pub async fn delete_tag(&self, id: i32) -> TagResult<bool> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn assign_to_task(&self, tag_id: i32, task_id: i32) -> TagResult<bool> {
        self.repository.assign_task(tag_id, task_id).await
    }

    #[instrument(skip(self))]
    pub async fn unassign_from_task(&self, tag_id: i32, task_id: i32) -> TagResult<bool> {
        self.repository.unassign_task(tag_id, task_id).await
    }

    /// Empty for an unknown tag
    pub async fn get_tasks_by_tag(&self, tag_id: i32) -> TagResult<Vec<Task>> {
        self.repository.tasks_for_tag(tag_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTagRepository;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_create_tag_rejects_long_name() {
        let service = TagService::new(MockTagRepository::new());
        let result = service.create_tag(CreateTag::named("x".repeat(51))).await;
        assert!(matches!(result, Err(TagError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_tag_duplicate() {
        let mut mock = MockTagRepository::new();
        mock.expect_find_by_name().returning(|name| {
            Ok(Some(Tag {
                id: 1,
                name: name.to_string(),
            }))
        });
        mock.expect_create().never();

        let service = TagService::new(mock);
        let result = service.create_tag(CreateTag::named("urgent")).await;
        assert!(matches!(result, Err(TagError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_rename_missing_tag_is_none() {
        let mut mock = MockTagRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(None));
        mock.expect_update()
            .with(eq(5), always())
            .returning(|_, _| Ok(None));

        let service = TagService::new(mock);
        let result = service
            .update_tag(
                5,
                UpdateTag {
                    name: "later".into(),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_tasks_by_tag_delegates() {
        let mut mock = MockTagRepository::new();
        mock.expect_tasks_for_tag()
            .with(eq(3))
            .returning(|_| Ok(Vec::new()));

        let service = TagService::new(mock);
        assert!(service.get_tasks_by_tag(3).await.unwrap().is_empty());
    }
}
