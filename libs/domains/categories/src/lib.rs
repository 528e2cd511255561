//! Categories Domain
//!
//! Named, coloured groupings of tasks. A task can sit in any number of
//! categories through the `task_categories` join table.
//!
//! ```rust,no_run
//! use domain_categories::{CategoryService, CreateCategory, SqlCategoryRepository};
//!
//! # async fn example(db: sea_orm::DatabaseConnection) -> Result<(), Box<dyn std::error::Error>> {
//! let service = CategoryService::new(SqlCategoryRepository::new(db));
//! let work = service.create_category(CreateCategory::named("Work")).await?;
//! service.assign_to_task(work.id, 1).await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;
pub mod task_category;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateCategory, UpdateCategory};
pub use repository::CategoryRepository;
pub use service::CategoryService;
pub use sql::SqlCategoryRepository;
