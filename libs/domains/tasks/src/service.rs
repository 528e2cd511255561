use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input.validate().map_err(TaskError::validation)?;

        if let Some(parent_id) = input.parent_task_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Option<Task>> {
        self.repository.get_by_id(id).await
    }

    /// List tasks with filters
    pub async fn list_tasks(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        self.repository.list(filter).await
    }

    /// Apply the supplied fields; `None` when the task does not exist
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: i32, input: UpdateTask) -> TaskResult<Option<Task>> {
        input.validate().map_err(TaskError::validation)?;

        if let Some(Some(parent_id)) = input.parent_task_id {
            if parent_id == id {
                return Err(TaskError::Validation(
                    "A task cannot be its own parent".to_string(),
                ));
            }
            self.ensure_parent_exists(parent_id).await?;
        }

        self.repository.update(id, input).await
    }

    /// Delete a task; its subtasks become root tasks
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<bool> {
        self.repository.delete(id).await
    }

    /// Create a task under `parent_id`
    #[instrument(skip(self, input), fields(parent_id = %parent_id))]
    pub async fn add_subtask(&self, parent_id: i32, mut input: CreateTask) -> TaskResult<Task> {
        input.validate().map_err(TaskError::validation)?;

        if self.repository.get_by_id(parent_id).await?.is_none() {
            return Err(TaskError::NotFound(parent_id));
        }

        input.parent_task_id = Some(parent_id);
        self.repository.create(input).await
    }

    /// Direct children only
    pub async fn get_subtasks(&self, parent_id: i32) -> TaskResult<Vec<Task>> {
        self.repository
            .list(TaskFilter {
                parent_task_id: Some(parent_id),
                ..Default::default()
            })
            .await
    }

    async fn ensure_parent_exists(&self, parent_id: i32) -> TaskResult<()> {
        match self.repository.get_by_id(parent_id).await? {
            Some(_) => Ok(()),
            None => Err(TaskError::Validation(format!(
                "Parent task {parent_id} does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use crate::repository::MockTaskRepository;
    use chrono::Utc;
    use mockall::predicate::*;

    fn task(id: i32, parent_task_id: Option<i32>) -> Task {
        let now = Utc::now();
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            priority: 3,
            due_date: None,
            status: TaskStatus::Pending,
            progress: 0,
            parent_task_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_task_validates_before_storage() {
        let mock = MockTaskRepository::new();
        let service = TaskService::new(mock);

        let result = service.create_task(CreateTask::titled("")).await;
        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_task_success() {
        let mut mock = MockTaskRepository::new();
        mock.expect_create()
            .withf(|input| input.title == "Write report" && input.priority == 3)
            .times(1)
            .returning(|_| Ok(task(1, None)));

        let service = TaskService::new(mock);
        let created = service
            .create_task(CreateTask::titled("Write report"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_create_task_with_missing_parent() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));
        mock.expect_create().never();

        let service = TaskService::new(mock);
        let mut input = CreateTask::titled("child");
        input.parent_task_id = Some(99);

        let result = service.create_task(input).await;
        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_task_absent_is_none() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id()
            .with(eq(7))
            .returning(|_| Ok(None));

        let service = TaskService::new(mock);
        assert!(service.get_task(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_task_rejects_out_of_range_priority() {
        let mock = MockTaskRepository::new();
        let service = TaskService::new(mock);

        let result = service
            .update_task(
                1,
                UpdateTask {
                    priority: Some(0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_task_rejects_self_parent() {
        let mock = MockTaskRepository::new();
        let service = TaskService::new(mock);

        let result = service
            .update_task(
                5,
                UpdateTask {
                    parent_task_id: Some(Some(5)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_subtask_missing_parent_is_not_found() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));
        mock.expect_create().never();

        let service = TaskService::new(mock);
        let result = service.add_subtask(3, CreateTask::titled("child")).await;
        assert!(matches!(result, Err(TaskError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_add_subtask_sets_parent() {
        let mut mock = MockTaskRepository::new();
        mock.expect_get_by_id()
            .with(eq(3))
            .returning(|id| Ok(Some(task(id, None))));
        mock.expect_create()
            .withf(|input| input.parent_task_id == Some(3))
            .returning(|_| Ok(task(4, Some(3))));

        let service = TaskService::new(mock);
        let child = service
            .add_subtask(3, CreateTask::titled("child"))
            .await
            .unwrap();
        assert_eq!(child.parent_task_id, Some(3));
    }

    #[tokio::test]
    async fn test_get_subtasks_filters_by_parent() {
        let mut mock = MockTaskRepository::new();
        mock.expect_list()
            .withf(|filter| filter.parent_task_id == Some(3) && !filter.root_only)
            .returning(|_| Ok(vec![task(4, Some(3))]));

        let service = TaskService::new(mock);
        let subtasks = service.get_subtasks(3).await.unwrap();
        assert_eq!(subtasks.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_task_reports_absence() {
        let mut mock = MockTaskRepository::new();
        mock.expect_delete().with(eq(8)).returning(|_| Ok(false));

        let service = TaskService::new(mock);
        assert!(!service.delete_task(8).await.unwrap());
    }
}
