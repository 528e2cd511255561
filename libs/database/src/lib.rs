//! Relational store plumbing shared by the taskboard crates.
//!
//! The `sql` module wraps sea-orm for both PostgreSQL and SQLite URLs:
//! pooled connections built from [`sql::SqlConfig`], startup retry,
//! a `SELECT 1` health probe and a generic migration runner.
//!
//! ```ignore
//! use database::sql;
//! use migration::Migrator;
//!
//! let db = sql::connect("sqlite::memory:").await?;
//! sql::run_migrations::<Migrator>(&db, "taskboard").await?;
//! ```

pub mod common;
pub mod sql;

pub use common::{DatabaseError, DatabaseResult};
