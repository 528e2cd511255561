use domain_tasks::Task;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(CategoryError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_category(&self, id: i32) -> CategoryResult<Option<Category>> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: i32,
        input: UpdateCategory,
    ) -> CategoryResult<Option<Category>> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if let Some(ref new_name) = input.name {
            if let Some(existing) = self.repository.find_by_name(new_name).await? {
                if existing.id != id {
                    return Err(CategoryError::DuplicateName(new_name.clone()));
                }
            }
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: i32) -> CategoryResult<bool> {
        self.repository.delete(id).await
    }

    /// Idempotent; `false` when the category or the task does not exist
    #[instrument(skip(self))]
    pub async fn assign_to_task(&self, category_id: i32, task_id: i32) -> CategoryResult<bool> {
        self.repository.assign_task(category_id, task_id).await
    }

    /// Idempotent; `false` when the category or the task does not exist
    #[instrument(skip(self))]
    pub async fn unassign_from_task(
        &self,
        category_id: i32,
        task_id: i32,
    ) -> CategoryResult<bool> {
        self.repository.unassign_task(category_id, task_id).await
    }

    /// Empty for an unknown category
    pub async fn get_tasks_by_category(&self, category_id: i32) -> CategoryResult<Vec<Task>> {
        self.repository.tasks_for_category(category_id).await
    }
}
