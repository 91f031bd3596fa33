//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::Duration;
use composable_todo::environment::{FailurePolicy, FeatureConfig, TodoEnvironment};
use composable_todo::model::{Todo, TodoId};
use composable_todo::repository::{RepositoryError, RepositoryFuture, TodoRepository};
use composable_todo_core::environment::Clock;
use composable_todo_testing::{SequentialIdGenerator, test_clock};
use std::sync::Arc;

/// First id handed out to todos created during a test
pub const FIRST_CREATED_ID: u64 = 100;

/// Fixture todo `n`, created `n` minutes after the test clock's epoch
pub fn todo(n: u64, title: &str) -> Todo {
    Todo::new(
        TodoId::from_uuid(SequentialIdGenerator::id(n)),
        title,
        "",
        test_clock().now() + Duration::minutes(i64::try_from(n).unwrap_or_default()),
    )
}

/// Fixed clock, sequential ids from [`FIRST_CREATED_ID`], silent failures
pub fn environment(repository: Arc<dyn TodoRepository>) -> TodoEnvironment {
    TodoEnvironment::new(
        repository,
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::starting_at(FIRST_CREATED_ID)),
    )
}

/// Like [`environment`], with failures reported as actions
pub fn reporting_environment(repository: Arc<dyn TodoRepository>) -> TodoEnvironment {
    environment(repository)
        .with_config(FeatureConfig::default().with_failure_policy(FailurePolicy::Report))
}

/// Message every [`FailingTodoRepository`] call fails with
pub const OFFLINE: &str = "Repository unavailable: offline";

/// A backend that is never reachable
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingTodoRepository;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("offline".into()))
}

impl TodoRepository for FailingTodoRepository {
    fn fetch_all(&self) -> RepositoryFuture<'_, Vec<Todo>> {
        Box::pin(async { offline() })
    }

    fn fetch(&self, _id: TodoId) -> RepositoryFuture<'_, Option<Todo>> {
        Box::pin(async { offline() })
    }

    fn save(&self, _todo: Todo) -> RepositoryFuture<'_, ()> {
        Box::pin(async { offline() })
    }

    fn update(&self, _todo: Todo) -> RepositoryFuture<'_, ()> {
        Box::pin(async { offline() })
    }

    fn delete(&self, _id: TodoId) -> RepositoryFuture<'_, ()> {
        Box::pin(async { offline() })
    }
}
