//! Plain-text rendering of feature state
//!
//! Each view borrows a state and implements [`fmt::Display`], so rendering is
//! a pure function of state: `println!("{}", TodoListView(&state))`.

use crate::app::{AppState, Destination};
use crate::features::todo_detail::TodoDetailState;
use crate::features::todo_form::TodoFormState;
use crate::features::todo_list::TodoListState;
use crate::model::{Todo, TodoFilter};
use chrono::{DateTime, Utc};
use std::fmt;

const DATE_FORMAT: &str = "%b %-d, %Y";

fn date(at: DateTime<Utc>) -> impl fmt::Display {
    at.format(DATE_FORMAT)
}

const fn mark(todo: &Todo) -> &'static str {
    if todo.is_completed() {
        "[x]"
    } else {
        "[ ]"
    }
}

/// The list screen
#[derive(Clone, Copy, Debug)]
pub struct TodoListView<'a>(pub &'a TodoListState);

impl fmt::Display for TodoListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "Todos")?;

        let filters = TodoFilter::ALL
            .iter()
            .map(|filter| {
                if *filter == state.filter {
                    format!("<{filter}>")
                } else {
                    filter.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(f, "  {filters}")?;

        if let Some(error) = &state.last_error {
            writeln!(f, "  ! {error}")?;
        }

        if state.is_loading {
            return writeln!(f, "  Loading...");
        }

        let todos = state.filtered_todos();
        if todos.is_empty() {
            return writeln!(f, "  (empty)");
        }

        for todo in todos {
            writeln!(f, "  {} {}", mark(todo), todo.title)?;
            if !todo.description.is_empty() {
                writeln!(f, "      {}", todo.description)?;
            }
        }
        Ok(())
    }
}

/// The new-todo form
#[derive(Clone, Copy, Debug)]
pub struct TodoFormView<'a>(pub &'a TodoFormState);

impl fmt::Display for TodoFormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "New Todo")?;
        writeln!(f, "  Title: {}", state.title)?;
        writeln!(f, "  Description: {}", state.description)?;
        if let Some(error) = &state.last_error {
            writeln!(f, "  ! {error}")?;
        }
        let save = if state.is_valid() { "[Save]" } else { "[Save (disabled)]" };
        writeln!(f, "  [Cancel] {save}")
    }
}

/// The detail screen
#[derive(Clone, Copy, Debug)]
pub struct TodoDetailView<'a>(pub &'a TodoDetailState);

impl fmt::Display for TodoDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TodoDetailState {
            todo,
            is_editing,
            last_error,
        } = self.0;

        writeln!(f, "Todo Details{}", if *is_editing { " (editing)" } else { "" })?;
        writeln!(f, "  {}", todo.title)?;
        if todo.description.is_empty() {
            writeln!(f, "  No description")?;
        } else {
            writeln!(f, "  {}", todo.description)?;
        }
        writeln!(f, "  {} Completed", mark(todo))?;
        writeln!(f, "  Created: {}", date(todo.created_at))?;
        if let Some(completed_at) = todo.completed_at() {
            writeln!(f, "  Completed: {}", date(completed_at))?;
        }
        if let Some(error) = last_error {
            writeln!(f, "  ! {error}")?;
        }
        if *is_editing {
            writeln!(f, "  [Cancel] [Done]")
        } else {
            writeln!(f, "  [Edit]")
        }
    }
}

/// The list with whatever is presented over it
#[derive(Clone, Copy, Debug)]
pub struct AppView<'a>(pub &'a AppState);

impl fmt::Display for AppView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TodoListView(&self.0.todo_list))?;
        match &self.0.destination {
            None => Ok(()),
            Some(Destination::Form(form)) => write!(f, "---\n{}", TodoFormView(form)),
            Some(Destination::Detail(detail)) => write!(f, "---\n{}", TodoDetailView(detail)),
        }
    }
}
