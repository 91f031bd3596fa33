//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Embed a child reducer that owns a field of the parent state
//! - **`if_let_reducer`**: Embed a child reducer whose state is only sometimes present
//!   (a presented screen, one variant of an enum)
//!
//! Scoped reducers translate in both directions: parent actions are narrowed to
//! child actions before the child runs, and the child's effects are lifted back
//! into parent actions with [`Effect::map`].
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use composable_todo_core::{Reducer, SmallVec, smallvec};
//! use composable_todo_core::effect::Effect;
//! use composable_todo_core::composition::{BoxedReducer, combine_reducers};
//!
//! #[derive(Clone)]
//! struct MyState {
//!     count: i32,
//!     name: String,
//! }
//!
//! #[derive(Clone)]
//! enum MyAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! struct CounterReducer;
//! struct NameReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = MyState;
//!     type Action = MyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut MyState, action: MyAction, _env: &()) -> SmallVec<[Effect<MyAction>; 4]> {
//!         if matches!(action, MyAction::Increment) {
//!             state.count += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = MyState;
//!     type Action = MyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut MyState, action: MyAction, _env: &()) -> SmallVec<[Effect<MyAction>; 4]> {
//!         if let MyAction::SetName(name) = action {
//!             state.name = name;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let reducers: Vec<BoxedReducer<MyState, MyAction, ()>> =
//!     vec![Box::new(CounterReducer), Box::new(NameReducer)];
//! let combined = combine_reducers(reducers);
//! let mut state = MyState { count: 0, name: String::new() };
//! let _ = combined.reduce(&mut state, MyAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// A boxed reducer that can be shared with the runtime's effect tasks.
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
/// Order matters: a child scope listed before the parent's own reducer sees an
/// action before the parent reacts to it.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// How a scoped reducer reaches its slice of the parent state.
enum StateAccess<S, SubS> {
    /// The child state is a plain field, always present
    Always(fn(&mut S) -> &mut SubS),
    /// The child state may be absent (optional or enum-variant state)
    Optional(fn(&mut S) -> Option<&mut SubS>),
}

/// Scopes a reducer to operate on a field of a larger state.
///
/// - `state`: borrows the child state out of the parent
/// - `to_child`: extracts a child action from a parent action (`None` for unrelated actions)
/// - `from_child`: embeds a child action into the parent action type, used to
///   lift the child's effects
///
/// # Examples
///
/// ```
/// use composable_todo_core::{Reducer, SmallVec, smallvec};
/// use composable_todo_core::effect::Effect;
/// use composable_todo_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut CounterState, _action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
///         state.count += 1;
///         smallvec![Effect::None]
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: CounterState,
/// }
///
/// #[derive(Clone, Debug)]
/// enum AppAction {
///     Counter(CounterAction),
/// }
///
/// fn counter_state(app: &mut AppState) -> &mut CounterState {
///     &mut app.counter
/// }
///
/// fn counter_action(action: AppAction) -> Option<CounterAction> {
///     match action {
///         AppAction::Counter(action) => Some(action),
///     }
/// }
///
/// let scoped = scope_reducer(CounterReducer, counter_state, counter_action, AppAction::Counter);
///
/// let mut state = AppState::default();
/// let _ = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
/// assert_eq!(state.counter.count, 1);
/// ```
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    to_child: fn(A) -> Option<SubA>,
    from_child: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        state: StateAccess::Always(state),
        to_child,
        from_child,
        _phantom: std::marker::PhantomData,
    }
}

/// Scopes a reducer to a child state that may be absent.
///
/// Child actions that arrive while the child state is absent are dropped and
/// logged; this happens when an effect finishes after its screen was dismissed.
pub fn if_let_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    state: fn(&mut S) -> Option<&mut SubS>,
    to_child: fn(A) -> Option<SubA>,
    from_child: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        state: StateAccess::Optional(state),
        to_child,
        from_child,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`] or [`if_let_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    state: StateAccess<S, SubS>,
    to_child: fn(A) -> Option<SubA>,
    from_child: fn(SubA) -> A,
    _phantom: std::marker::PhantomData<E>,
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    A: Send + 'static,
    SubA: Send + std::fmt::Debug + 'static,
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.to_child)(action) else {
            return SmallVec::new();
        };

        let child_state = match &self.state {
            StateAccess::Always(get) => Some(get(state)),
            StateAccess::Optional(get) => get(state),
        };

        let Some(child_state) = child_state else {
            tracing::warn!(action = ?child_action, "Child action received while its state is absent, dropping");
            return SmallVec::new();
        };

        let from_child = self.from_child;
        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .filter(|effect| !effect.is_none())
            .map(|effect| effect.map(from_child))
            .collect()
    }
}
