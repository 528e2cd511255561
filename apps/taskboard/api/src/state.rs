//! Shared application state.
//!
//! Services are built once at startup and handed to the domain routers;
//! every clone below is an `Arc` bump.

use database::sql::DatabaseConnection;
use domain_categories::{CategoryService, SqlCategoryRepository};
use domain_reminders::{ReminderService, SqlReminderRepository};
use domain_tags::{SqlTagRepository, TagService};
use domain_tasks::{SqlTaskRepository, TaskService, TasksState};
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    /// Task service plus the priority, deadline and progress views over it
    pub tasks: Arc<TasksState<SqlTaskRepository>>,
    pub categories: CategoryService<SqlCategoryRepository>,
    pub tags: TagService<SqlTagRepository>,
    pub reminders: ReminderService<SqlReminderRepository>,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let tasks = TaskService::new(SqlTaskRepository::new(db.clone()));

        Self {
            tasks: Arc::new(TasksState::new(tasks)),
            categories: CategoryService::new(SqlCategoryRepository::new(db.clone())),
            tags: TagService::new(SqlTagRepository::new(db.clone())),
            reminders: ReminderService::new(SqlReminderRepository::new(db.clone())),
            config,
            db,
        }
    }
}
