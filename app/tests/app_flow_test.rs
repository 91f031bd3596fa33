//! Root feature: presentation, delegate routing and the runtime store

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{FIRST_CREATED_ID, FailingTodoRepository, OFFLINE, todo};
use composable_todo::app::{
    AppAction, AppReducer, AppState, Destination, DestinationAction, PresentationAction,
};
use composable_todo::features::todo_detail::{TodoDetailAction, TodoDetailDelegate, TodoDetailState};
use composable_todo::features::todo_form::{TodoFormAction, TodoFormDelegate, TodoFormState};
use composable_todo::features::todo_list::{TodoListAction, TodoListState};
use composable_todo::model::{Todo, TodoId};
use composable_todo::repository::{InMemoryTodoRepository, TodoRepository};
use composable_todo_core::environment::Clock;
use composable_todo_runtime::Store;
use composable_todo_testing::{SequentialIdGenerator, TestStore, test_clock};
use std::sync::Arc;
use std::time::Duration;

fn form_mut(state: &mut AppState) -> &mut TodoFormState {
    match state.destination.as_mut() {
        Some(Destination::Form(form)) => form,
        other => panic!("expected a presented form, found {other:?}"),
    }
}

fn detail_mut(state: &mut AppState) -> &mut TodoDetailState {
    match state.destination.as_mut() {
        Some(Destination::Detail(detail)) => detail,
        other => panic!("expected a presented detail, found {other:?}"),
    }
}

fn is_created(action: &AppAction) -> bool {
    matches!(
        action,
        AppAction::Destination(PresentationAction::Presented(DestinationAction::Form(
            TodoFormAction::Delegate(TodoFormDelegate::Created(_))
        )))
    )
}

#[tokio::test]
async fn create_through_form_lands_at_front() {
    let existing = todo(1, "Existing");
    let repository = Arc::new(InMemoryTodoRepository::with_todos([existing.clone()]));
    let env = common::environment(repository.clone());
    let initial = AppState {
        todo_list: TodoListState::with_todos([existing.clone()]),
        destination: None,
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    store
        .send(AppAction::TodoList(TodoListAction::AddTodoButtonTapped), |state| {
            state.destination = Some(Destination::Form(TodoFormState::default()));
        })
        .await;
    store
        .send(AppAction::form(TodoFormAction::TitleChanged("  Buy milk  ".into())), |state| {
            form_mut(state).title = "  Buy milk  ".into();
        })
        .await;
    store
        .send(AppAction::form(TodoFormAction::SaveButtonTapped), |_| {})
        .await;

    let created = Todo::new(
        TodoId::from_uuid(SequentialIdGenerator::id(FIRST_CREATED_ID)),
        "Buy milk",
        "",
        test_clock().now(),
    );
    store
        .receive(is_created, |state| {
            state.todo_list.todos.insert_front(created.clone());
        })
        .await;
    store
        .receive(|action| *action == AppAction::dismiss(), |state| {
            state.destination = None;
        })
        .await;

    assert_eq!(store.state().todo_list.todos.at(0), Some(&created));
    assert_eq!(store.state().todo_list.todos.len(), 2);
    assert_eq!(repository.fetch(created.id()).await.unwrap(), Some(created));
    store.finish();
}

#[tokio::test]
async fn whitespace_title_creates_nothing() {
    let repository = Arc::new(InMemoryTodoRepository::new());
    let env = common::environment(repository.clone());
    let initial = AppState {
        todo_list: TodoListState::default(),
        destination: Some(Destination::Form(TodoFormState {
            title: " \t ".into(),
            ..TodoFormState::default()
        })),
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    store
        .send(AppAction::form(TodoFormAction::SaveButtonTapped), |_| {})
        .await;

    assert_eq!(store.pending_received(), 0);
    assert!(repository.is_empty().await);
    assert!(store.state().todo_list.todos.is_empty());
    store.finish();
}

#[tokio::test]
async fn cancel_dismisses_without_saving() {
    let repository = Arc::new(InMemoryTodoRepository::new());
    let env = common::environment(repository.clone());
    let initial = AppState {
        todo_list: TodoListState::default(),
        destination: Some(Destination::Form(TodoFormState {
            title: "Half typed".into(),
            ..TodoFormState::default()
        })),
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    store
        .send(AppAction::form(TodoFormAction::CancelButtonTapped), |_| {})
        .await;
    store
        .receive(
            |action| *action == AppAction::form(TodoFormAction::Delegate(TodoFormDelegate::Cancelled)),
            |_| {},
        )
        .await;
    store
        .receive(|action| *action == AppAction::dismiss(), |state| {
            state.destination = None;
        })
        .await;

    assert!(repository.is_empty().await);
    store.finish();
}

#[tokio::test]
async fn failed_save_keeps_form_open_when_reported() {
    let env = common::reporting_environment(Arc::new(FailingTodoRepository));
    let initial = AppState {
        todo_list: TodoListState::default(),
        destination: Some(Destination::Form(TodoFormState {
            title: "Buy milk".into(),
            ..TodoFormState::default()
        })),
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    store
        .send(AppAction::form(TodoFormAction::SaveButtonTapped), |_| {})
        .await;
    store
        .receive(
            |action| *action == AppAction::form(TodoFormAction::SaveFailed(OFFLINE.into())),
            |state| form_mut(state).last_error = Some(OFFLINE.into()),
        )
        .await;

    assert!(store.state().form().is_some());
    store.finish();
}

#[tokio::test]
async fn detail_edit_updates_list_and_stays_open() {
    let original = todo(1, "Walk the dog");
    let other = todo(2, "Other");
    let repository = Arc::new(InMemoryTodoRepository::with_todos([original.clone(), other.clone()]));
    let env = common::environment(repository.clone());
    let initial = AppState {
        todo_list: TodoListState::with_todos([other.clone(), original.clone()]),
        destination: None,
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    store
        .send(AppAction::TodoList(TodoListAction::TodoTapped(original.clone())), |state| {
            state.destination = Some(Destination::Detail(TodoDetailState::new(original.clone())));
        })
        .await;
    store
        .send(AppAction::detail(TodoDetailAction::EditButtonTapped), |state| {
            detail_mut(state).is_editing = true;
        })
        .await;
    store
        .send(AppAction::detail(TodoDetailAction::TitleChanged("Walk the cat".into())), |state| {
            detail_mut(state).todo.title = "Walk the cat".into();
        })
        .await;
    store
        .send(AppAction::detail(TodoDetailAction::SaveButtonTapped), |state| {
            detail_mut(state).is_editing = false;
        })
        .await;

    let mut edited = original.clone();
    edited.title = "Walk the cat".into();
    store
        .receive(
            |action| {
                *action
                    == AppAction::detail(TodoDetailAction::Delegate(TodoDetailDelegate::Updated(
                        edited.clone(),
                    )))
            },
            |state| state.todo_list.todos.upsert(edited.clone()),
        )
        .await;

    assert!(store.state().detail().is_some());
    assert_eq!(store.state().todo_list.todos.at(1), Some(&edited));
    assert_eq!(repository.fetch(original.id()).await.unwrap(), Some(edited));

    store
        .send(AppAction::detail(TodoDetailAction::CloseButtonTapped), |_| {})
        .await;
    store
        .receive(
            |action| {
                *action == AppAction::detail(TodoDetailAction::Delegate(TodoDetailDelegate::Dismiss))
            },
            |state| state.destination = None,
        )
        .await;
    store.finish();
}

#[tokio::test]
async fn detail_toggle_reaches_list() {
    let original = todo(1, "Walk the dog");
    let repository = Arc::new(InMemoryTodoRepository::with_todos([original.clone()]));
    let env = common::environment(repository);
    let initial = AppState {
        todo_list: TodoListState::with_todos([original.clone()]),
        destination: Some(Destination::Detail(TodoDetailState::new(original.clone()))),
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env).with_exhaustivity(false);

    let done = original.toggled(test_clock().now());
    store
        .send(AppAction::detail(TodoDetailAction::ToggleCompletion), |state| {
            detail_mut(state).todo = done.clone();
        })
        .await;

    assert_eq!(store.state().todo_list.todos.at(0), Some(&done));
    assert_eq!(store.skip_received_actions(), 1);
    store.finish();
}

#[tokio::test]
async fn failed_detail_toggle_restores_original_when_reported() {
    let original = todo(1, "Walk the dog");
    let env = common::reporting_environment(Arc::new(FailingTodoRepository));
    let initial = AppState {
        todo_list: TodoListState::with_todos([original.clone()]),
        destination: Some(Destination::Detail(TodoDetailState::new(original.clone()))),
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    let done = original.toggled(test_clock().now());
    store
        .send(AppAction::detail(TodoDetailAction::ToggleCompletion), |state| {
            detail_mut(state).todo = done.clone();
        })
        .await;
    store
        .receive(
            |action| {
                *action
                    == AppAction::detail(TodoDetailAction::UpdateFailed {
                        previous: Some(original.clone()),
                        error: OFFLINE.into(),
                    })
            },
            |state| {
                let detail = detail_mut(state);
                detail.todo = original.clone();
                detail.last_error = Some(OFFLINE.into());
            },
        )
        .await;

    assert_eq!(store.state().detail().map(|d| &d.todo), Some(&original));
    assert!(!store.state().todo_list.todos.at(0).unwrap().is_completed());
    store.finish();
}

#[tokio::test]
async fn late_detail_result_after_dismissal_still_updates_list() {
    let original = todo(1, "Walk the dog");
    let env = common::environment(Arc::new(InMemoryTodoRepository::new()));
    let initial = AppState {
        todo_list: TodoListState::with_todos([original.clone()]),
        destination: None,
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    let done = original.toggled(test_clock().now());
    store
        .send(
            AppAction::detail(TodoDetailAction::Delegate(TodoDetailDelegate::Updated(done.clone()))),
            |state| state.todo_list.todos.upsert(done.clone()),
        )
        .await;
    store.finish();
}

#[tokio::test]
async fn back_gesture_dismisses_any_destination() {
    let env = common::environment(Arc::new(InMemoryTodoRepository::new()));
    let initial = AppState {
        todo_list: TodoListState::default(),
        destination: Some(Destination::Form(TodoFormState::default())),
    };
    let mut store = TestStore::new(AppReducer::new(), initial, env);

    store
        .send(AppAction::dismiss(), |state| state.destination = None)
        .await;
    store
        .send(AppAction::dismiss(), |_| {})
        .await;
    store.finish();
}

#[tokio::test]
async fn store_runs_full_flow() {
    let repository = Arc::new(InMemoryTodoRepository::with_todos([todo(1, "A"), todo(2, "B")]));
    let env = common::environment(repository.clone());
    let store = Store::new(AppState::default(), AppReducer::new(), env);

    store
        .send_and_wait(AppAction::TodoList(TodoListAction::OnAppear))
        .await
        .unwrap()
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();
    let titles = store
        .state(|s| s.todo_list.todos.iter().map(|t| t.title.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(titles, ["B", "A"]);

    store
        .send(AppAction::TodoList(TodoListAction::AddTodoButtonTapped))
        .await
        .unwrap();
    store
        .send(AppAction::form(TodoFormAction::TitleChanged("Buy milk".into())))
        .await
        .unwrap();

    let created = store
        .send_and_wait_for(
            AppAction::form(TodoFormAction::SaveButtonTapped),
            is_created,
            Duration::from_secs(5),
        )
        .await
        .unwrap();
    assert!(is_created(&created));

    // The dismissal follows the delegate on the same stream
    let mut dismissed = false;
    for _ in 0..100 {
        if store.state(|s| s.destination.is_none()).await {
            dismissed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(dismissed, "form was never dismissed");

    let first = store
        .state(|s| s.todo_list.todos.at(0).map(|t| t.title.clone()))
        .await;
    assert_eq!(first.as_deref(), Some("Buy milk"));
    assert_eq!(repository.len().await, 3);

    store.shutdown(Duration::from_secs(5)).await.unwrap();
}
