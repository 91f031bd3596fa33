//! New-todo form
//!
//! On a successful save the form emits [`TodoFormDelegate::Created`] and then
//! [`TodoFormAction::DismissRequested`]; the parent reacts to both.

use crate::environment::TodoEnvironment;
use crate::model::{Todo, TodoId};
use composable_todo_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec, stream_effect};
use std::sync::Arc;

/// State of the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoFormState {
    /// Title field, untrimmed
    pub title: String,
    /// Description field, untrimmed
    pub description: String,
    /// Last reported save failure
    pub last_error: Option<String>,
}

impl TodoFormState {
    /// Whether the title holds anything besides whitespace
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Messages for the presenting feature
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoFormDelegate {
    /// The todo was saved
    Created(Todo),
    /// The user backed out
    Cancelled,
}

/// Inputs of the form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoFormAction {
    /// Title field edited
    TitleChanged(String),
    /// Description field edited
    DescriptionChanged(String),
    /// Save tapped
    SaveButtonTapped,
    /// Cancel tapped
    CancelButtonTapped,
    /// The repository rejected the save
    SaveFailed(String),
    /// Outbound message for the parent
    Delegate(TodoFormDelegate),
    /// The form asks to be dismissed
    DismissRequested,
}

/// Reducer for the form
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoFormReducer;

impl TodoFormReducer {
    /// Creates a new `TodoFormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoFormReducer {
    type State = TodoFormState;
    type Action = TodoFormAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(?action, "todo form");

        match action {
            TodoFormAction::TitleChanged(title) => {
                state.title = title;
                smallvec![Effect::None]
            },

            TodoFormAction::DescriptionChanged(description) => {
                state.description = description;
                smallvec![Effect::None]
            },

            TodoFormAction::SaveButtonTapped => {
                if !state.is_valid() {
                    return smallvec![Effect::None];
                }

                let todo = Todo::new(
                    TodoId::from_uuid(env.ids.next_id()),
                    state.title.trim(),
                    state.description.trim(),
                    env.clock.now(),
                );

                let repository = Arc::clone(&env.repository);
                let policy = env.failure_policy();
                smallvec![stream_effect!(async_stream::stream! {
                    match repository.save(todo.clone()).await {
                        Ok(()) => {
                            yield TodoFormAction::Delegate(TodoFormDelegate::Created(todo));
                            yield TodoFormAction::DismissRequested;
                        },
                        Err(error) => {
                            if let Some(action) = policy.on_error("save", &error, TodoFormAction::SaveFailed) {
                                yield action;
                            }
                        },
                    }
                })]
            },

            TodoFormAction::CancelButtonTapped => {
                smallvec![stream_effect!(futures::stream::iter([
                    TodoFormAction::Delegate(TodoFormDelegate::Cancelled),
                    TodoFormAction::DismissRequested,
                ]))]
            },

            TodoFormAction::SaveFailed(error) => {
                state.last_error = Some(error);
                smallvec![Effect::None]
            },

            // Handled by the parent
            TodoFormAction::Delegate(_) | TodoFormAction::DismissRequested => {
                smallvec![Effect::None]
            },
        }
    }
}
