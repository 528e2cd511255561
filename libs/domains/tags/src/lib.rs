//! Tags Domain
//!
//! Free-form labels attached to tasks through the `task_tags` join table.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;
pub mod task_tag;

pub use error::{TagError, TagResult};
pub use handlers::ApiDoc;
pub use models::{CreateTag, Tag, UpdateTag};
pub use repository::TagRepository;
pub use service::TagService;
pub use sql::SqlTagRepository;
