//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the Composable Todo architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - [`ReducerTest`]: Given-When-Then checks of a single reducer call
//! - [`TestStore`]: step-by-step checks of a reducer and the actions its effects feed back
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{SequentialIdGenerator, TestStore, test_clock};
//!
//! #[tokio::test]
//! async fn loads_todos_on_appear() {
//!     let mut store = TestStore::new(TodoListReducer, TodoListState::default(), test_environment());
//!
//!     store.send(TodoListAction::OnAppear, |s| s.is_loading = true).await;
//!     store
//!         .receive(|a| matches!(a, TodoListAction::TodosLoaded(_)), |s| s.is_loading = false)
//!         .await;
//!     store.finish();
//! }
//! ```

use chrono::{DateTime, Utc};
use composable_todo_core::environment::{Clock, IdGenerator};


/// Inline effect execution with per-step state assertions
pub mod test_store;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::FixedClock;
    /// use composable_todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: `00000000-0000-0000-0000-000000000001`, `...02`, ...
    ///
    /// Clones share the same counter.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::SequentialIdGenerator;
    /// use composable_todo_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Clone)]
    pub struct SequentialIdGenerator {
        next: Arc<AtomicU64>,
    }

    impl SequentialIdGenerator {
        /// Start at 1
        #[must_use]
        pub fn new() -> Self {
            Self::starting_at(1)
        }

        /// Start at an arbitrary value
        #[must_use]
        pub fn starting_at(first: u64) -> Self {
            Self {
                next: Arc::new(AtomicU64::new(first)),
            }
        }

        /// The identifier the `n`-th call (1-based) returns when starting at 1
        #[must_use]
        pub fn id(n: u64) -> Uuid {
            Uuid::from_u128(u128::from(n))
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Self::id(self.next.fetch_add(1, Ordering::SeqCst))
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::ReducerTest;
pub use test_store::TestStore;
