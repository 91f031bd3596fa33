//! Domain types: the todo entity, the ordered collection the list shows, and
//! the list filter.

use chrono::{DateTime, Duration, Utc};
use composable_todo_core::environment::{Clock, IdGenerator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a todo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo
///
/// The id never changes after construction. `completed_at` is `Some` exactly
/// when the todo is completed; completion only changes through
/// [`Todo::set_completed`] and [`Todo::toggle`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    /// Short title
    pub title: String,
    /// Free-form details, possibly empty
    pub description: String,
    is_completed: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates an active todo
    #[must_use]
    pub fn new(
        id: TodoId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Whether the todo is done
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// When the todo was completed, if it is
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Builder-style completion, for seeding and tests
    #[must_use]
    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.set_completed(true, at);
        self
    }

    /// Marks the todo completed (stamping `now`) or active (clearing the stamp)
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.is_completed = completed;
        self.completed_at = completed.then_some(now);
    }

    /// Flips completion in place
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.set_completed(!self.is_completed, now);
    }

    /// Returns a copy with completion flipped
    #[must_use]
    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        let mut todo = self.clone();
        todo.toggle(now);
        todo
    }
}

/// Insertion-ordered todos, unique by id
///
/// Later duplicates replace earlier ones in place when collecting from an
/// iterator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the todo with this id
    #[must_use]
    pub fn index_of(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id() == id)
    }

    /// Whether a todo with this id is present
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.index_of(id).is_some()
    }

    /// Looks up a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id() == id)
    }

    /// Todo at a position
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Todo> {
        self.items.get(index)
    }

    /// Iterates in order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    /// Inserts at the front
    ///
    /// Returns `false`, leaving the list untouched, if the id is already present.
    pub fn insert_front(&mut self, todo: Todo) -> bool {
        self.insert_at(0, todo)
    }

    /// Inserts at `index`, clamped to the list length
    ///
    /// Returns `false`, leaving the list untouched, if the id is already present.
    pub fn insert_at(&mut self, index: usize, todo: Todo) -> bool {
        if self.contains(todo.id()) {
            return false;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, todo);
        true
    }

    /// Replaces the todo with the same id in place, or appends it
    pub fn upsert(&mut self, todo: Todo) {
        match self.index_of(todo.id()) {
            Some(index) => self.items[index] = todo,
            None => self.items.push(todo),
        }
    }

    /// Removes a todo, returning where it was and what it was
    pub fn remove(&mut self, id: TodoId) -> Option<(usize, Todo)> {
        let index = self.index_of(id)?;
        Some((index, self.items.remove(index)))
    }

    /// Todos that pass `filter`, in order
    #[must_use]
    pub fn filtered(&self, filter: TodoFilter) -> Vec<&Todo> {
        self.items.iter().filter(|todo| filter.matches(todo)).collect()
    }
}

impl FromIterator<Todo> for TodoList {
    fn from_iter<I: IntoIterator<Item = Todo>>(iter: I) -> Self {
        let mut list = Self::new();
        for todo in iter {
            list.upsert(todo);
        }
        list
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Which todos the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoFilter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl TodoFilter {
    /// Every filter, in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Whether a todo passes this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.is_completed(),
            Self::Completed => todo.is_completed(),
        }
    }
}

impl std::fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no filter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter {0:?} (expected All, Active or Completed)")]
pub struct ParseFilterError(String);

impl FromStr for TodoFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// The todos a fresh repository starts with
///
/// Creation times are staggered a second apart so that newest-first
/// ordering keeps them in the order listed here.
#[must_use]
pub fn sample_todos(clock: &dyn Clock, ids: &dyn IdGenerator) -> Vec<Todo> {
    let now = clock.now();
    let seeds = [
        ("Build iOS App", "Create a todo app using TCA", false),
        ("Learn Swift Navigation", "Understand navigation patterns", true),
        ("Set up Factory DI", "Configure dependency injection", true),
    ];

    seeds
        .into_iter()
        .zip(0_i64..)
        .map(|((title, description, done), age)| {
            let todo = Todo::new(
                TodoId::from_uuid(ids.next_id()),
                title,
                description,
                now - Duration::seconds(age),
            );
            if done { todo.completed(now) } else { todo }
        })
        .collect()
}
