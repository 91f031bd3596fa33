//! Injected dependencies and feature configuration

use crate::model::sample_todos;
use crate::repository::{InMemoryTodoRepository, RepositoryError, TodoRepository};
use composable_todo_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use std::sync::Arc;

/// What a feature does when a repository call fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and dispatch nothing; local state may diverge from the repository
    #[default]
    Silent,
    /// Dispatch a failure action that records the error (and rolls back optimistic changes)
    Report,
}

impl FailurePolicy {
    /// Logs `error` and, under [`FailurePolicy::Report`], builds the failure action
    pub fn on_error<A>(
        self,
        operation: &'static str,
        error: &RepositoryError,
        action: impl FnOnce(String) -> A,
    ) -> Option<A> {
        tracing::warn!(operation, %error, policy = ?self, "Repository call failed");
        match self {
            Self::Silent => None,
            Self::Report => Some(action(error.to_string())),
        }
    }
}

/// Feature-level settings
///
/// # Example
///
/// ```
/// use composable_todo::environment::{FailurePolicy, FeatureConfig};
///
/// let config = FeatureConfig::default().with_failure_policy(FailurePolicy::Report);
/// assert_eq!(config.failure_policy, FailurePolicy::Report);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Reaction to failed repository calls
    pub failure_policy: FailurePolicy,
}

impl FeatureConfig {
    /// Set the failure policy
    #[must_use]
    pub const fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Dependencies shared by every todo feature
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Persistence
    pub repository: Arc<dyn TodoRepository>,
    /// Timestamps for creation and completion
    pub clock: Arc<dyn Clock>,
    /// Identifiers for new todos
    pub ids: Arc<dyn IdGenerator>,
    /// Feature settings
    pub config: FeatureConfig,
}

impl TodoEnvironment {
    /// Creates an environment with the default configuration
    #[must_use]
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            clock,
            ids,
            config: FeatureConfig::default(),
        }
    }

    /// Replaces the configuration
    #[must_use]
    pub const fn with_config(mut self, config: FeatureConfig) -> Self {
        self.config = config;
        self
    }

    /// System clock, random ids, and an in-memory repository holding the sample todos
    #[must_use]
    pub fn live() -> Self {
        let clock = Arc::new(SystemClock);
        let ids = Arc::new(UuidGenerator);
        let repository = InMemoryTodoRepository::with_todos(sample_todos(&*clock, &*ids));
        Self::new(Arc::new(repository), clock, ids)
    }

    /// Shorthand for `self.config.failure_policy`
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.config.failure_policy
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
