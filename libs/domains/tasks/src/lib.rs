//! Tasks Domain
//!
//! Hierarchical tasks with priority, due dates and progress.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ PriorityService  DeadlineService  Progress…  │  ← single-field rules
//! └──────────────────────┬───────────────────────┘
//!                 ┌──────▼──────┐
//!                 │ TaskService │  ← validation, hierarchy
//!                 └──────┬──────┘
//!                 ┌──────▼──────┐
//!                 │ Repository  │  ← trait + sea-orm implementation
//!                 └─────────────┘
//! ```
//!
//! The specialised services never touch storage; they write through
//! [`TaskService::update_task`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{CreateTask, SqlTaskRepository, TaskService, TasksState};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite::memory:").await?;
//!
//! let service = TaskService::new(SqlTaskRepository::new(db));
//! let task = service.create_task(CreateTask::titled("Write report")).await?;
//!
//! let state = TasksState::new(service);
//! state.progress.set_progress(task.id, 100).await?;
//! # Ok(())
//! # }
//! ```

pub mod deadline;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod priority;
pub mod progress;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use deadline::{DeadlineInfo, DeadlineService, TimeRemaining};
pub use error::{TaskError, TaskResult};
pub use handlers::{ProgressApiDoc, TasksApiDoc, TasksState};
pub use models::{CreateTask, Task, TaskFilter, TaskListQuery, TaskStatus, UpdateTask};
pub use priority::{PriorityInfo, PriorityLevel, PriorityService};
pub use progress::{ProgressService, ProgressStats};
pub use repository::TaskRepository;
pub use service::TaskService;
pub use sql::SqlTaskRepository;
