//! Reminders Domain
//!
//! Timestamps attached to tasks. A reminder is pending once its time has
//! passed and it has not been marked as notified; delivery itself happens
//! outside this crate.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

pub use error::{ReminderError, ReminderResult};
pub use handlers::ApiDoc;
pub use models::{CreateReminder, Reminder, UpdateReminder};
pub use repository::ReminderRepository;
pub use service::ReminderService;
pub use sql::SqlReminderRepository;
