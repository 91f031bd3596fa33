//! Viewing and editing a single todo

use crate::environment::TodoEnvironment;
use crate::model::Todo;
use composable_todo_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// State of the detail screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoDetailState {
    /// The todo on screen, including unsaved edits
    pub todo: Todo,
    /// Edit mode is on
    pub is_editing: bool,
    /// Last reported update failure
    pub last_error: Option<String>,
}

impl TodoDetailState {
    /// Shows `todo`, not editing
    #[must_use]
    pub const fn new(todo: Todo) -> Self {
        Self {
            todo,
            is_editing: false,
            last_error: None,
        }
    }
}

/// Messages for the presenting feature
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoDetailDelegate {
    /// The repository holds this version now
    Updated(Todo),
    /// Close the screen
    Dismiss,
}

/// Inputs of the detail screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoDetailAction {
    /// Title field edited
    TitleChanged(String),
    /// Description field edited
    DescriptionChanged(String),
    /// Edit tapped
    EditButtonTapped,
    /// Save tapped
    SaveButtonTapped,
    /// Cancel tapped while editing
    CancelButtonTapped,
    /// Completion toggle tapped
    ToggleCompletion,
    /// Close tapped
    CloseButtonTapped,
    /// The repository rejected an update
    UpdateFailed {
        /// Todo to restore, when the update came from a toggle
        previous: Option<Todo>,
        /// Failure message
        error: String,
    },
    /// Outbound message for the parent
    Delegate(TodoDetailDelegate),
}

/// Reducer for the detail screen
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoDetailReducer;

impl TodoDetailReducer {
    /// Creates a new `TodoDetailReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn persist(
        env: &TodoEnvironment,
        todo: Todo,
        previous: Option<Todo>,
    ) -> Effect<TodoDetailAction> {
        let repository = Arc::clone(&env.repository);
        let policy = env.failure_policy();
        async_effect! {
            match repository.update(todo.clone()).await {
                Ok(()) => Some(TodoDetailAction::Delegate(TodoDetailDelegate::Updated(todo))),
                Err(error) => policy.on_error("update", &error, |error| {
                    TodoDetailAction::UpdateFailed { previous, error }
                }),
            }
        }
    }
}

impl Reducer for TodoDetailReducer {
    type State = TodoDetailState;
    type Action = TodoDetailAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(?action, id = %state.todo.id(), "todo detail");

        match action {
            TodoDetailAction::TitleChanged(title) => {
                state.todo.title = title;
                smallvec![Effect::None]
            },

            TodoDetailAction::DescriptionChanged(description) => {
                state.todo.description = description;
                smallvec![Effect::None]
            },

            TodoDetailAction::EditButtonTapped => {
                state.is_editing = true;
                smallvec![Effect::None]
            },

            TodoDetailAction::SaveButtonTapped => {
                state.is_editing = false;
                smallvec![Self::persist(env, state.todo.clone(), None)]
            },

            // Field edits stay in local state, unsaved
            TodoDetailAction::CancelButtonTapped => {
                state.is_editing = false;
                smallvec![Effect::None]
            },

            TodoDetailAction::ToggleCompletion => {
                let previous = state.todo.clone();
                state.todo.toggle(env.clock.now());
                smallvec![Self::persist(env, state.todo.clone(), Some(previous))]
            },

            TodoDetailAction::CloseButtonTapped => {
                smallvec![async_effect! {
                    Some(TodoDetailAction::Delegate(TodoDetailDelegate::Dismiss))
                }]
            },

            TodoDetailAction::UpdateFailed { previous, error } => {
                if let Some(previous) = previous {
                    state.todo = previous;
                }
                state.last_error = Some(error);
                smallvec![Effect::None]
            },

            TodoDetailAction::Delegate(_) => smallvec![Effect::None],
        }
    }
}
