//! Todo persistence
//!
//! [`TodoRepository`] is the async CRUD contract the features talk to through
//! their effects. [`InMemoryTodoRepository`] is the only backend: a map behind
//! one async mutex, so every operation is atomic with respect to the others.

use crate::model::{Todo, TodoId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors returned by repository operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// `update` was called for an id that is not stored
    #[error("Todo {0} not found")]
    NotFound(TodoId),

    /// The backend could not be reached
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Boxed future returned by every repository operation
pub type RepositoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Async CRUD over todos
///
/// Implementations must be safe to call concurrently. Methods return boxed
/// futures so the trait stays object safe and features can hold an
/// `Arc<dyn TodoRepository>` inside `'static` effects.
pub trait TodoRepository: Send + Sync {
    /// Every stored todo, newest `created_at` first
    ///
    /// # Errors
    ///
    /// Backend failures only; the in-memory repository never fails.
    fn fetch_all(&self) -> RepositoryFuture<'_, Vec<Todo>>;

    /// The todo stored under `id`, if any
    ///
    /// # Errors
    ///
    /// Backend failures only; the in-memory repository never fails.
    fn fetch(&self, id: TodoId) -> RepositoryFuture<'_, Option<Todo>>;

    /// Inserts or overwrites `todo` at its id
    ///
    /// # Errors
    ///
    /// Backend failures only; the in-memory repository never fails.
    fn save(&self, todo: Todo) -> RepositoryFuture<'_, ()>;

    /// Overwrites an existing todo
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if `todo.id()` is not stored; the
    /// repository is left unchanged.
    fn update(&self, todo: Todo) -> RepositoryFuture<'_, ()>;

    /// Removes the todo stored under `id`; absent ids are a successful no-op
    ///
    /// # Errors
    ///
    /// Backend failures only; the in-memory repository never fails.
    fn delete(&self, id: TodoId) -> RepositoryFuture<'_, ()>;
}

/// Todos kept in process memory
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<Mutex<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    /// An empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository seeded with `todos` (later duplicates win)
    #[must_use]
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let todos = todos.into_iter().map(|todo| (todo.id(), todo)).collect();
        Self {
            todos: Arc::new(Mutex::new(todos)),
        }
    }

    /// Number of stored todos
    pub async fn len(&self) -> usize {
        self.todos.lock().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.todos.lock().await.is_empty()
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn fetch_all(&self) -> RepositoryFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let mut todos: Vec<Todo> = self.todos.lock().await.values().cloned().collect();
            // Ties broken by id so the order never depends on hashing
            todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id().cmp(&b.id())));
            tracing::debug!(count = todos.len(), "fetch_all");
            Ok(todos)
        })
    }

    fn fetch(&self, id: TodoId) -> RepositoryFuture<'_, Option<Todo>> {
        Box::pin(async move {
            let todo = self.todos.lock().await.get(&id).cloned();
            tracing::debug!(%id, found = todo.is_some(), "fetch");
            Ok(todo)
        })
    }

    fn save(&self, todo: Todo) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            tracing::debug!(id = %todo.id(), title = %todo.title, "save");
            self.todos.lock().await.insert(todo.id(), todo);
            Ok(())
        })
    }

    fn update(&self, todo: Todo) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            let mut todos = self.todos.lock().await;
            let Some(slot) = todos.get_mut(&todo.id()) else {
                tracing::debug!(id = %todo.id(), "update of unknown todo");
                return Err(RepositoryError::NotFound(todo.id()));
            };
            tracing::debug!(id = %todo.id(), completed = todo.is_completed(), "update");
            *slot = todo;
            Ok(())
        })
    }

    fn delete(&self, id: TodoId) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            let removed = self.todos.lock().await.remove(&id).is_some();
            tracing::debug!(%id, removed, "delete");
            Ok(())
        })
    }
}
