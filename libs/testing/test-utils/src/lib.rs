//! Shared test utilities for the domain crates
//!
//! - `TestDatabase`: migrated in-memory SQLite, or a PostgreSQL container with
//!   the `postgres` feature
//! - `TestDataBuilder`: deterministic names and relative timestamps
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let name = builder.name("category", "main");
//! }
//! ```

mod test_database;

pub use test_database::TestDatabase;

use chrono::{DateTime, Duration, Utc};

/// Deterministic test data keyed by a seed
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name so reruns produce the same data
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique-per-test name, short enough for the 50-char tag limit
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("tag", "urgent"), "tag-7-urgent");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("{}-{}-{}", prefix, self.seed % 100_000, suffix)
    }

    pub fn title(&self, suffix: &str) -> String {
        format!("Task {} ({})", suffix, self.seed % 100_000)
    }

    /// Now shifted by whole hours, truncated to seconds so stored and
    /// reloaded values compare equal
    pub fn hours_from_now(&self, hours: i64) -> DateTime<Utc> {
        truncate_to_seconds(Utc::now() + Duration::hours(hours))
    }

    pub fn days_from_now(&self, days: i64) -> DateTime<Utc> {
        truncate_to_seconds(Utc::now() + Duration::days(days))
    }
}

fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.timestamp(), 0).unwrap_or(ts)
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap an `Option`, naming what was missing
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert two id lists hold the same ids, ignoring order
    pub fn assert_same_ids(actual: &[i32], expected: &[i32], context: &str) {
        let mut actual = actual.to_vec();
        let mut expected = expected.to_vec();
        actual.sort_unstable();
        expected.sort_unstable();
        assert_eq!(actual, expected, "{}: id sets differ", context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.name("tag", "a"), builder2.name("tag", "a"));
        assert_eq!(builder1.title("x"), builder2.title("x"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.name("tag", "a"), builder2.name("tag", "a"));
    }

    #[test]
    fn test_relative_timestamps_have_no_subsecond_part() {
        let builder = TestDataBuilder::new(1);
        let ts = builder.hours_from_now(2);
        assert_eq!(ts.timestamp_subsec_nanos(), 0);
        assert!(ts > Utc::now());
    }

    #[test]
    fn test_assert_same_ids_ignores_order() {
        assertions::assert_same_ids(&[3, 1, 2], &[1, 2, 3], "ids");
    }
}
