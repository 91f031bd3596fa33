//! List feature against a real in-memory repository and a failing one

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{FailingTodoRepository, OFFLINE, todo};
use composable_todo::features::todo_list::{TodoListAction, TodoListReducer, TodoListState};
use composable_todo::repository::{InMemoryTodoRepository, TodoRepository};
use composable_todo_core::environment::Clock;
use composable_todo_testing::{TestStore, test_clock};
use std::sync::Arc;

#[tokio::test]
async fn appear_on_empty_repository() {
    let env = common::environment(Arc::new(InMemoryTodoRepository::new()));
    let mut store = TestStore::new(TodoListReducer::new(), TodoListState::default(), env);

    store
        .send(TodoListAction::OnAppear, |state| state.is_loading = true)
        .await;
    store
        .receive(
            |action| *action == TodoListAction::TodosLoaded(vec![]),
            |state| state.is_loading = false,
        )
        .await;

    assert!(store.state().todos.is_empty());
    store.finish();
}

#[tokio::test]
async fn appear_loads_newest_first() {
    let older = todo(1, "A");
    let newer = todo(2, "B");
    let repository = InMemoryTodoRepository::with_todos([older.clone(), newer.clone()]);
    let env = common::environment(Arc::new(repository));
    let mut store = TestStore::new(TodoListReducer::new(), TodoListState::default(), env);

    store
        .send(TodoListAction::OnAppear, |state| state.is_loading = true)
        .await;

    let loaded = vec![newer.clone(), older.clone()];
    store
        .receive(
            |action| matches!(action, TodoListAction::TodosLoaded(_)),
            move |state| {
                state.is_loading = false;
                state.todos = loaded.into_iter().collect();
            },
        )
        .await;

    let titles: Vec<_> = store.state().todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["B", "A"]);
    store.finish();
}

#[tokio::test]
async fn toggle_twice_round_trips_completion() {
    let x = todo(1, "X");
    let repository = Arc::new(InMemoryTodoRepository::with_todos([x.clone()]));
    let env = common::environment(repository.clone());
    let now = test_clock().now();
    let mut store = TestStore::new(TodoListReducer::new(), TodoListState::with_todos([x.clone()]), env);

    // Local state only changes once the repository confirms
    store
        .send(TodoListAction::ToggleTodoCompletion(x.clone()), |_| {})
        .await;
    let done = x.toggled(now);
    store
        .receive(
            |action| *action == TodoListAction::TodoUpdated(done.clone()),
            |state| state.todos.upsert(done.clone()),
        )
        .await;

    let current = store.state().todos.at(0).cloned().unwrap();
    assert!(current.is_completed());
    assert_eq!(current.completed_at(), Some(now));
    assert_eq!(repository.fetch(x.id()).await.unwrap(), Some(current.clone()));

    store
        .send(TodoListAction::ToggleTodoCompletion(current.clone()), |_| {})
        .await;
    let undone = current.toggled(now);
    store
        .receive(
            |action| *action == TodoListAction::TodoUpdated(undone.clone()),
            |state| state.todos.upsert(undone.clone()),
        )
        .await;

    let current = store.state().todos.at(0).cloned().unwrap();
    assert!(!current.is_completed());
    assert_eq!(current.completed_at(), None);
    store.finish();
}

#[tokio::test]
async fn toggle_of_unknown_todo_is_silent_by_default() {
    let stranger = todo(7, "not stored");
    let env = common::environment(Arc::new(InMemoryTodoRepository::new()));
    let mut store = TestStore::new(
        TodoListReducer::new(),
        TodoListState::with_todos([stranger.clone()]),
        env,
    );

    store
        .send(TodoListAction::ToggleTodoCompletion(stranger), |_| {})
        .await;

    assert_eq!(store.pending_received(), 0);
    assert!(!store.state().todos.at(0).unwrap().is_completed());
    store.finish();
}

#[tokio::test]
async fn delete_persists() {
    let a = todo(1, "a");
    let b = todo(2, "b");
    let repository = Arc::new(InMemoryTodoRepository::with_todos([a.clone(), b.clone()]));
    let env = common::environment(repository.clone());
    let mut store = TestStore::new(
        TodoListReducer::new(),
        TodoListState::with_todos([b.clone(), a.clone()]),
        env,
    );

    store
        .send(TodoListAction::DeleteTodo(a.clone()), |state| {
            state.todos.remove(a.id());
        })
        .await;

    assert_eq!(repository.fetch_all().await.unwrap(), vec![b]);
    store.finish();
}

#[tokio::test]
async fn delete_failure_stays_removed_when_silent() {
    let a = todo(1, "a");
    let b = todo(2, "b");
    let env = common::environment(Arc::new(FailingTodoRepository));
    let mut store = TestStore::new(
        TodoListReducer::new(),
        TodoListState::with_todos([a.clone(), b.clone()]),
        env,
    );

    store
        .send(TodoListAction::DeleteTodo(a.clone()), |state| {
            state.todos.remove(a.id());
        })
        .await;

    assert_eq!(store.state().todos.iter().collect::<Vec<_>>(), vec![&b]);
    assert_eq!(store.state().last_error, None);
    store.finish();
}

#[tokio::test]
async fn delete_failure_restores_position_when_reported() {
    let a = todo(1, "a");
    let b = todo(2, "b");
    let c = todo(3, "c");
    let env = common::reporting_environment(Arc::new(FailingTodoRepository));
    let mut store = TestStore::new(
        TodoListReducer::new(),
        TodoListState::with_todos([a.clone(), b.clone(), c.clone()]),
        env,
    );

    store
        .send(TodoListAction::DeleteTodo(b.clone()), |state| {
            state.todos.remove(b.id());
        })
        .await;
    store
        .receive(
            |action| matches!(action, TodoListAction::DeleteFailed { index: 1, .. }),
            |state| {
                state.todos.insert_at(1, b.clone());
                state.last_error = Some(OFFLINE.into());
            },
        )
        .await;

    assert_eq!(
        store.state().todos.iter().collect::<Vec<_>>(),
        vec![&a, &b, &c]
    );
    store.finish();
}

#[tokio::test]
async fn load_failure_is_reported() {
    let env = common::reporting_environment(Arc::new(FailingTodoRepository));
    let mut store = TestStore::new(TodoListReducer::new(), TodoListState::default(), env);

    store
        .send(TodoListAction::OnAppear, |state| state.is_loading = true)
        .await;
    store
        .receive(
            |action| *action == TodoListAction::LoadFailed(OFFLINE.into()),
            |state| {
                state.is_loading = false;
                state.last_error = Some(OFFLINE.into());
            },
        )
        .await;
    store.finish();
}

#[tokio::test]
async fn silent_load_failure_leaves_list_loading() {
    let env = common::environment(Arc::new(FailingTodoRepository));
    let mut store = TestStore::new(TodoListReducer::new(), TodoListState::default(), env);

    store
        .send(TodoListAction::OnAppear, |state| state.is_loading = true)
        .await;

    assert!(store.state().is_loading);
    store.finish();
}

#[tokio::test]
async fn update_failure_is_reported() {
    let x = todo(1, "X");
    let env = common::reporting_environment(Arc::new(FailingTodoRepository));
    let mut store = TestStore::new(TodoListReducer::new(), TodoListState::with_todos([x.clone()]), env);

    store
        .send(TodoListAction::ToggleTodoCompletion(x), |_| {})
        .await;
    store
        .receive(
            |action| matches!(action, TodoListAction::UpdateFailed(_)),
            |state| state.last_error = Some(OFFLINE.into()),
        )
        .await;

    assert!(!store.state().todos.at(0).unwrap().is_completed());
    store.finish();
}
