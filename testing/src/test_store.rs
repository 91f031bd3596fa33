//! A store for tests that runs effects inline
//!
//! [`TestStore`] reduces actions like the runtime `Store`, but instead of
//! spawning effects it awaits them on the caller's task. Every action an
//! effect produces is reduced immediately and queued together with the
//! state before and after it, so the test can walk through the feedback loop
//! one action at a time with [`TestStore::receive`].
//!
//! In exhaustive mode (the default) every state change must be described and
//! every received action must be handled before the next `send` or `finish`.

#![allow(clippy::module_name_repetitions)]

use composable_todo_core::{effect::Effect, reducer::Reducer};
use futures::StreamExt;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

/// One action produced by an effect, with the state around its reduction
struct Received<S, A> {
    action: A,
    before: S,
    after: S,
}

/// Step-by-step reducer harness with inline effect execution
///
/// Effects run in declaration order: `Parallel` behaves like `Sequential`
/// and `Delay` delivers its action without waiting.
pub struct TestStore<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: E,
    state: S,
    received: VecDeque<Received<S, A>>,
    exhaustive: bool,
}

impl<R, S, A, E> TestStore<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone + PartialEq + Debug,
    A: Clone + Debug + 'static,
{
    /// Create an exhaustive test store
    #[must_use]
    pub fn new(reducer: R, initial_state: S, environment: E) -> Self {
        Self {
            reducer,
            environment,
            state: initial_state,
            received: VecDeque::new(),
            exhaustive: true,
        }
    }

    /// Turn exhaustive checking on or off
    ///
    /// When off, `send` may be called with unhandled received actions,
    /// `receive` skips actions that do not match, and `finish` ignores
    /// leftovers.
    #[must_use]
    pub const fn with_exhaustivity(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }

    /// Current state, including the effect of every received action
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// The environment effects run against
    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.environment
    }

    /// Number of received actions not yet handled
    #[must_use]
    pub fn pending_received(&self) -> usize {
        self.received.len()
    }

    /// Send an action and describe the state change it causes
    ///
    /// `expected` receives a copy of the state before the action and must
    /// turn it into the state after the action. All resulting effects run to
    /// completion before this returns.
    ///
    /// # Panics
    ///
    /// Panics if received actions are unhandled (exhaustive mode) or the
    /// resulting state differs from the expected one.
    #[allow(clippy::panic)] // Test assertion
    pub async fn send<F>(&mut self, action: A, expected: F)
    where
        F: FnOnce(&mut S),
    {
        if self.exhaustive {
            self.assert_no_received("send");
        }
        tracing::debug!(?action, "TestStore send");

        let mut expected_state = self.state.clone();
        expected(&mut expected_state);

        let effects = self
            .reducer
            .reduce(&mut self.state, action.clone(), &self.environment);

        assert_eq!(
            self.state, expected_state,
            "State after sending {action:?} differs from expected"
        );

        self.run_effects(effects.into_vec()).await;
    }

    /// Handle the next action produced by an effect
    ///
    /// In non-exhaustive mode, unmatched actions ahead of the first match are
    /// skipped.
    ///
    /// # Panics
    ///
    /// Panics if no action was received, the next action does not match, or
    /// the state after it differs from the expected one.
    #[allow(clippy::panic)] // Test assertion
    pub async fn receive<M, F>(&mut self, matcher: M, expected: F)
    where
        M: Fn(&A) -> bool,
        F: FnOnce(&mut S),
    {
        let next = loop {
            let Some(next) = self.received.pop_front() else {
                panic!("Expected to receive an action, but none was received");
            };
            if matcher(&next.action) {
                break next;
            }
            assert!(
                !self.exhaustive,
                "Received unexpected action {:?}",
                next.action
            );
            tracing::debug!(action = ?next.action, "TestStore skipped received action");
        };

        let mut expected_state = next.before;
        expected(&mut expected_state);
        assert_eq!(
            next.after, expected_state,
            "State after receiving {:?} differs from expected",
            next.action
        );
    }

    /// Drop every queued received action without asserting on it
    ///
    /// Returns how many actions were skipped.
    pub fn skip_received_actions(&mut self) -> usize {
        let skipped = self.received.len();
        self.received.clear();
        skipped
    }

    /// End the test
    ///
    /// # Panics
    ///
    /// Panics in exhaustive mode if received actions are unhandled.
    pub fn finish(self) {
        if self.exhaustive {
            self.assert_no_received("finish");
        }
    }

    #[allow(clippy::panic)] // Test assertion
    fn assert_no_received(&self, step: &str) {
        assert!(
            self.received.is_empty(),
            "Must handle {} received action(s) before {step}: {:?}",
            self.received.len(),
            self.received.iter().map(|r| &r.action).collect::<Vec<_>>()
        );
    }

    fn run_effects(&mut self, effects: Vec<Effect<A>>) -> Pin<Box<dyn Future<Output = ()> + '_>> {
        Box::pin(async move {
            for effect in effects {
                self.run_effect(effect).await;
            }
        })
    }

    fn run_effect(&mut self, effect: Effect<A>) -> Pin<Box<dyn Future<Output = ()> + '_>> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    self.run_effects(effects).await;
                },
                Effect::Delay { action, .. } => self.reduce_received(*action).await,
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        self.reduce_received(action).await;
                    }
                },
                Effect::Stream(mut stream) => {
                    while let Some(action) = stream.next().await {
                        self.reduce_received(action).await;
                    }
                },
            }
        })
    }

    async fn reduce_received(&mut self, action: A) {
        tracing::debug!(?action, "TestStore received action from effect");
        let before = self.state.clone();
        let effects = self
            .reducer
            .reduce(&mut self.state, action.clone(), &self.environment);
        self.received.push_back(Received {
            action,
            before,
            after: self.state.clone(),
        });
        self.run_effects(effects.into_vec()).await;
    }
}
