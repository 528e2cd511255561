use async_trait::async_trait;
use domain_tasks::Task;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>>;

    /// All categories, oldest first
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    async fn update(&self, id: i32, input: UpdateCategory) -> CategoryResult<Option<Category>>;

    async fn delete(&self, id: i32) -> CategoryResult<bool>;

    /// `false` if either side is missing; an existing link is left alone
    async fn assign_task(&self, category_id: i32, task_id: i32) -> CategoryResult<bool>;

    /// `false` if either side is missing; a missing link is not an error
    async fn unassign_task(&self, category_id: i32, task_id: i32) -> CategoryResult<bool>;

    async fn tasks_for_category(&self, category_id: i32) -> CategoryResult<Vec<Task>>;
}
