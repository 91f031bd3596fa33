//! Root feature: the list plus one optionally presented destination
//!
//! The [`AppReducer`] is a composition of four reducers, run in this order for
//! every action:
//!
//! 1. the list reducer, scoped to [`AppState::todo_list`]
//! 2. the form reducer, active while [`Destination::Form`] is presented
//! 3. the detail reducer, active while [`Destination::Detail`] is presented
//! 4. the router, which opens and closes destinations and applies child
//!    delegate messages to the list
//!
//! Children therefore see their own actions before the router reacts to them.

use crate::environment::TodoEnvironment;
use crate::features::todo_detail::{
    TodoDetailAction, TodoDetailDelegate, TodoDetailReducer, TodoDetailState,
};
use crate::features::todo_form::{TodoFormAction, TodoFormDelegate, TodoFormReducer, TodoFormState};
use crate::features::todo_list::{TodoListAction, TodoListReducer, TodoListState};
use composable_todo_core::composition::{
    combine_reducers, if_let_reducer, scope_reducer, BoxedReducer, CombinedReducer,
};
use composable_todo_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// The screen presented over the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// New-todo form
    Form(TodoFormState),
    /// Detail of one todo
    Detail(TodoDetailState),
}

/// Root state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// The list screen, always present
    pub todo_list: TodoListState,
    /// At most one presented screen
    pub destination: Option<Destination>,
}

impl AppState {
    /// The presented form, if any
    #[must_use]
    pub const fn form(&self) -> Option<&TodoFormState> {
        match &self.destination {
            Some(Destination::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// The presented detail, if any
    #[must_use]
    pub const fn detail(&self) -> Option<&TodoDetailState> {
        match &self.destination {
            Some(Destination::Detail(detail)) => Some(detail),
            _ => None,
        }
    }
}

/// Actions addressed to the presented screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DestinationAction {
    /// For the form
    Form(TodoFormAction),
    /// For the detail
    Detail(TodoDetailAction),
}

/// Lifecycle of a presented child
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationAction<A> {
    /// An action for the presented child
    Presented(A),
    /// Close whatever is presented
    Dismiss,
}

/// Root actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// For the list screen
    TodoList(TodoListAction),
    /// For the presented screen
    Destination(PresentationAction<DestinationAction>),
}

impl AppAction {
    /// Wraps a form action
    #[must_use]
    pub const fn form(action: TodoFormAction) -> Self {
        Self::Destination(PresentationAction::Presented(DestinationAction::Form(action)))
    }

    /// Wraps a detail action
    #[must_use]
    pub const fn detail(action: TodoDetailAction) -> Self {
        Self::Destination(PresentationAction::Presented(DestinationAction::Detail(action)))
    }

    /// Closes the presented screen
    #[must_use]
    pub const fn dismiss() -> Self {
        Self::Destination(PresentationAction::Dismiss)
    }
}

fn list_state(state: &mut AppState) -> &mut TodoListState {
    &mut state.todo_list
}

fn list_action(action: AppAction) -> Option<TodoListAction> {
    match action {
        AppAction::TodoList(action) => Some(action),
        AppAction::Destination(_) => None,
    }
}

fn form_state(state: &mut AppState) -> Option<&mut TodoFormState> {
    match state.destination.as_mut()? {
        Destination::Form(form) => Some(form),
        Destination::Detail(_) => None,
    }
}

fn form_action(action: AppAction) -> Option<TodoFormAction> {
    match action {
        AppAction::Destination(PresentationAction::Presented(DestinationAction::Form(action))) => {
            Some(action)
        },
        _ => None,
    }
}

/// The form's dismissal request becomes the parent's dismissal
fn from_form(action: TodoFormAction) -> AppAction {
    match action {
        TodoFormAction::DismissRequested => AppAction::dismiss(),
        action => AppAction::form(action),
    }
}

fn detail_state(state: &mut AppState) -> Option<&mut TodoDetailState> {
    match state.destination.as_mut()? {
        Destination::Detail(detail) => Some(detail),
        Destination::Form(_) => None,
    }
}

fn detail_action(action: AppAction) -> Option<TodoDetailAction> {
    match action {
        AppAction::Destination(PresentationAction::Presented(DestinationAction::Detail(action))) => {
            Some(action)
        },
        _ => None,
    }
}

/// Opens and closes destinations; applies delegate messages to the list
struct Router;

impl Reducer for Router {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::TodoList(TodoListAction::AddTodoButtonTapped) => {
                tracing::debug!("Presenting form");
                state.destination = Some(Destination::Form(TodoFormState::default()));
            },

            AppAction::TodoList(TodoListAction::TodoTapped(todo)) => {
                tracing::debug!(id = %todo.id(), "Presenting detail");
                state.destination = Some(Destination::Detail(TodoDetailState::new(todo)));
            },

            AppAction::Destination(PresentationAction::Presented(DestinationAction::Form(
                TodoFormAction::Delegate(TodoFormDelegate::Created(todo)),
            ))) => {
                let id = todo.id();
                if !state.todo_list.todos.insert_front(todo) {
                    tracing::warn!(%id, "Created todo already listed, ignoring");
                }
            },

            AppAction::Destination(PresentationAction::Presented(DestinationAction::Detail(
                TodoDetailAction::Delegate(TodoDetailDelegate::Updated(todo)),
            ))) => {
                state.todo_list.todos.upsert(todo);
            },

            AppAction::Destination(PresentationAction::Presented(DestinationAction::Detail(
                TodoDetailAction::Delegate(TodoDetailDelegate::Dismiss),
            ))
            | PresentationAction::Dismiss) => {
                if state.destination.take().is_some() {
                    tracing::debug!("Destination dismissed");
                }
            },

            _ => {},
        }

        smallvec![Effect::None]
    }
}

/// Root reducer
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, TodoEnvironment>,
}

impl AppReducer {
    /// Wires the list, form, detail and router together
    #[must_use]
    pub fn new() -> Self {
        let reducers: Vec<BoxedReducer<AppState, AppAction, TodoEnvironment>> = vec![
            Box::new(scope_reducer(
                TodoListReducer::new(),
                list_state,
                list_action,
                AppAction::TodoList,
            )),
            Box::new(if_let_reducer(
                TodoFormReducer::new(),
                form_state,
                form_action,
                from_form,
            )),
            Box::new(if_let_reducer(
                TodoDetailReducer::new(),
                detail_state,
                detail_action,
                AppAction::detail,
            )),
            Box::new(Router),
        ];

        Self {
            inner: combine_reducers(reducers),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(?action, "app");
        self.inner.reduce(state, action, env)
    }
}
