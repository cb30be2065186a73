//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied and automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let user_id = builder.user_id();
//!     let title = builder.name("event", "standup");
//! }
//! ```

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Tests stay reproducible: the same seed always yields the same ids and names.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// assert!(builder.user_id() > 0);
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A positive user id derived from the seed
    pub fn user_id(&self) -> i64 {
        (self.seed % 1_000_000_000) as i64 + 1
    }

    /// A second user id distinct from [`TestDataBuilder::user_id`]
    pub fn other_user_id(&self) -> i64 {
        self.user_id() + 1_000_000_000
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("event", "standup"), "test-event-7-standup");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Fixed anchor for window tests: 2026-01-22T00:00:00Z
    pub fn anchor(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 22, 0, 0, 0)
            .single()
            .expect("valid anchor date")
    }

    /// The anchor shifted by `hours` (may be negative)
    pub fn hours_from_anchor(&self, hours: i64) -> DateTime<Utc> {
        self.anchor() + TimeDelta::hours(hours)
    }
}

/// Test assertion helpers
pub mod assertions {
    use chrono::{DateTime, Utc};

    /// Assert that dates are non-decreasing
    pub fn assert_sorted_by_date<'a>(dates: impl IntoIterator<Item = &'a DateTime<Utc>>, context: &str) {
        let dates: Vec<_> = dates.into_iter().collect();
        for pair in dates.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "{}: {} comes before {}",
                context,
                pair[0],
                pair[1]
            );
        }
    }
}
