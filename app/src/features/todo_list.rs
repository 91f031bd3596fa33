//! The todo list: loading, filtering, completion toggling and deletion

use crate::environment::TodoEnvironment;
use crate::model::{Todo, TodoFilter, TodoList};
use composable_todo_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// State of the list screen
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
    /// Todos in display order
    pub todos: TodoList,
    /// A load is in flight
    pub is_loading: bool,
    /// Current filter
    pub filter: TodoFilter,
    /// Last reported repository failure
    pub last_error: Option<String>,
}

impl TodoListState {
    /// A list already holding `todos`
    #[must_use]
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        Self {
            todos: todos.into_iter().collect(),
            ..Self::default()
        }
    }

    /// The todos the current filter lets through, in order
    #[must_use]
    pub fn filtered_todos(&self) -> Vec<&Todo> {
        self.todos.filtered(self.filter)
    }
}

/// Inputs of the list screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoListAction {
    /// The screen became visible; load every todo
    OnAppear,
    /// The load finished
    TodosLoaded(Vec<Todo>),
    /// The add button was tapped (handled by the parent)
    AddTodoButtonTapped,
    /// A row was tapped (handled by the parent)
    TodoTapped(Todo),
    /// The completion checkbox of a row was tapped
    ToggleTodoCompletion(Todo),
    /// A row was deleted
    DeleteTodo(Todo),
    /// The filter picker changed
    FilterChanged(TodoFilter),
    /// The repository accepted an update
    TodoUpdated(Todo),
    /// Loading failed
    LoadFailed(String),
    /// An update was rejected
    UpdateFailed(String),
    /// A delete was rejected; the todo goes back where it was
    DeleteFailed {
        /// Position the todo had before the optimistic removal
        index: usize,
        /// The removed todo
        todo: Todo,
        /// Failure message
        error: String,
    },
}

/// Reducer for the list screen
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoListReducer;

impl TodoListReducer {
    /// Creates a new `TodoListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoListReducer {
    type State = TodoListState;
    type Action = TodoListAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(?action, "todo list");

        match action {
            TodoListAction::OnAppear => {
                state.is_loading = true;

                let repository = Arc::clone(&env.repository);
                let policy = env.failure_policy();
                smallvec![async_effect! {
                    match repository.fetch_all().await {
                        Ok(todos) => Some(TodoListAction::TodosLoaded(todos)),
                        Err(error) => policy.on_error("fetch_all", &error, TodoListAction::LoadFailed),
                    }
                }]
            },

            TodoListAction::TodosLoaded(todos) => {
                state.is_loading = false;
                state.todos = todos.into_iter().collect();
                state.last_error = None;
                smallvec![Effect::None]
            },

            TodoListAction::AddTodoButtonTapped | TodoListAction::TodoTapped(_) => {
                smallvec![Effect::None]
            },

            TodoListAction::ToggleTodoCompletion(todo) => {
                let updated = todo.toggled(env.clock.now());

                let repository = Arc::clone(&env.repository);
                let policy = env.failure_policy();
                smallvec![async_effect! {
                    match repository.update(updated.clone()).await {
                        Ok(()) => Some(TodoListAction::TodoUpdated(updated)),
                        Err(error) => policy.on_error("update", &error, TodoListAction::UpdateFailed),
                    }
                }]
            },

            TodoListAction::DeleteTodo(todo) => {
                // Optimistic: gone from the list before the repository confirms
                let (index, todo) = state
                    .todos
                    .remove(todo.id())
                    .unwrap_or_else(|| (state.todos.len(), todo));

                let repository = Arc::clone(&env.repository);
                let policy = env.failure_policy();
                smallvec![async_effect! {
                    match repository.delete(todo.id()).await {
                        Ok(()) => None,
                        Err(error) => policy.on_error("delete", &error, |error| {
                            TodoListAction::DeleteFailed { index, todo, error }
                        }),
                    }
                }]
            },

            TodoListAction::FilterChanged(filter) => {
                state.filter = filter;
                smallvec![Effect::None]
            },

            TodoListAction::TodoUpdated(todo) => {
                state.todos.upsert(todo);
                smallvec![Effect::None]
            },

            TodoListAction::LoadFailed(error) => {
                state.is_loading = false;
                state.last_error = Some(error);
                smallvec![Effect::None]
            },

            TodoListAction::UpdateFailed(error) => {
                state.last_error = Some(error);
                smallvec![Effect::None]
            },

            TodoListAction::DeleteFailed { index, todo, error } => {
                state.todos.insert_at(index, todo);
                state.last_error = Some(error);
                smallvec![Effect::None]
            },
        }
    }
}
