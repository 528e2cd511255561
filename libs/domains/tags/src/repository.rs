use async_trait::async_trait;
use domain_tasks::Task;

use crate::error::TagResult;
use crate::models::{CreateTag, Tag, UpdateTag};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, input: CreateTag) -> TagResult<Tag>;

    async fn get_by_id(&self, id: i32) -> TagResult<Option<Tag>>;

    async fn find_by_name(&self, name: &str) -> TagResult<Option<Tag>>;

    async fn list(&self) -> TagResult<Vec<Tag>>;

    async fn update(&self, id: i32, input: UpdateTag) -> TagResult<Option<Tag>>;

    async fn delete(&self, id: i32) -> TagResult<bool>;

    /// `false` if either side is missing
    async fn assign_task(&self, tag_id: i32, task_id: i32) -> TagResult<bool>;

    /// `false` if either side is missing
    async fn unassign_task(&self, tag_id: i32, task_id: i32) -> TagResult<bool>;

    async fn tasks_for_tag(&self, tag_id: i32) -> TagResult<Vec<Task>>;
}
