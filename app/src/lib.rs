//! # Composable Todo
//!
//! A todo list built from small features composed into one root reducer:
//!
//! - [`features::todo_list`]: loads, filters, toggles and deletes todos
//! - [`features::todo_form`]: creates a todo and hands it to its parent
//! - [`features::todo_detail`]: views and edits one todo
//! - [`app`]: presents the form or the detail over the list and routes their
//!   delegate messages into list mutations
//!
//! Persistence goes through [`repository::TodoRepository`]; the only backend is
//! the in-memory [`repository::InMemoryTodoRepository`]. Dependencies reach
//! the reducers through [`environment::TodoEnvironment`].
//!
//! ## Example
//!
//! ```no_run
//! use composable_todo::app::{AppAction, AppReducer, AppState};
//! use composable_todo::environment::TodoEnvironment;
//! use composable_todo::features::todo_list::TodoListAction;
//! use composable_todo_runtime::Store;
//!
//! # async fn demo() -> Result<(), composable_todo_runtime::StoreError> {
//! let store = Store::new(AppState::default(), AppReducer::new(), TodoEnvironment::live());
//! store.send_and_wait(AppAction::TodoList(TodoListAction::OnAppear)).await?.wait().await;
//! let count = store.state(|s| s.todo_list.todos.len()).await;
//! assert_eq!(count, 3);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod environment;
pub mod features;
pub mod model;
pub mod repository;
pub mod view;

pub use app::{AppAction, AppReducer, AppState, Destination};
pub use environment::{FailurePolicy, FeatureConfig, TodoEnvironment};
pub use model::{Todo, TodoFilter, TodoId, TodoList};
pub use repository::{InMemoryTodoRepository, RepositoryError, TodoRepository};
