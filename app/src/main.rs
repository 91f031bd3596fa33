//! Scripted walk through the todo app.
//!
//! Drives the root store the way a user would and prints the rendered screen
//! after every step. Set `RUST_LOG=debug` to watch reducers and repository
//! calls.

use anyhow::Context;
use composable_todo::app::{AppAction, AppReducer, AppState};
use composable_todo::environment::TodoEnvironment;
use composable_todo::features::todo_detail::TodoDetailAction;
use composable_todo::features::todo_form::TodoFormAction;
use composable_todo::features::todo_list::TodoListAction;
use composable_todo::model::{Todo, TodoFilter};
use composable_todo::view::AppView;
use composable_todo_runtime::Store;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type TodoStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// Sends `action`, waits for everything it sets off, then renders
async fn step(store: &TodoStore, label: &str, action: AppAction) -> anyhow::Result<()> {
    println!("\n>>> {label}");
    store.send_and_wait(action).await?.wait().await;
    let rendered = store.state(|state| AppView(state).to_string()).await;
    print!("{rendered}");
    Ok(())
}

async fn todo_at(store: &TodoStore, index: usize) -> anyhow::Result<Todo> {
    store
        .state(|state| state.todo_list.todos.at(index).cloned())
        .await
        .with_context(|| format!("no todo at index {index}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "composable_todo=info,composable_todo_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Composable Todo ===");

    let store: TodoStore = Store::new(AppState::default(), AppReducer::new(), TodoEnvironment::live());

    let mut actions = store.subscribe_actions();
    let observer = tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(action) => tracing::info!(?action, "Effect fed back"),
                Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "Observer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    step(&store, "Appear", AppAction::TodoList(TodoListAction::OnAppear)).await?;

    step(&store, "Tap +", AppAction::TodoList(TodoListAction::AddTodoButtonTapped)).await?;
    step(&store, "Type title", AppAction::form(TodoFormAction::TitleChanged("  Buy milk ".into()))).await?;
    step(
        &store,
        "Type description",
        AppAction::form(TodoFormAction::DescriptionChanged("Whole, 2 liters".into())),
    )
    .await?;
    step(&store, "Save", AppAction::form(TodoFormAction::SaveButtonTapped)).await?;

    let milk = todo_at(&store, 0).await?;
    step(
        &store,
        "Complete \"Buy milk\"",
        AppAction::TodoList(TodoListAction::ToggleTodoCompletion(milk)),
    )
    .await?;

    let completed: TodoFilter = "completed".parse()?;
    step(&store, "Show completed", AppAction::TodoList(TodoListAction::FilterChanged(completed))).await?;
    step(&store, "Show all", AppAction::TodoList(TodoListAction::FilterChanged(TodoFilter::All))).await?;

    let first = todo_at(&store, 1).await?;
    step(&store, "Open detail", AppAction::TodoList(TodoListAction::TodoTapped(first))).await?;
    step(&store, "Edit", AppAction::detail(TodoDetailAction::EditButtonTapped)).await?;
    step(
        &store,
        "Rename",
        AppAction::detail(TodoDetailAction::TitleChanged("Ship iOS App".into())),
    )
    .await?;
    step(&store, "Done", AppAction::detail(TodoDetailAction::SaveButtonTapped)).await?;
    step(&store, "Close", AppAction::detail(TodoDetailAction::CloseButtonTapped)).await?;

    let last = store
        .state(|state| state.todo_list.todos.iter().last().cloned())
        .await
        .context("list is empty")?;
    step(&store, "Delete last", AppAction::TodoList(TodoListAction::DeleteTodo(last))).await?;

    store.shutdown(Duration::from_secs(5)).await?;
    observer.abort();

    println!("\n=== Demo Complete ===");
    Ok(())
}
