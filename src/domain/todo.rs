use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned key of a todo list. `0` until the row is inserted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoListId(pub i64);

/// Store-assigned key of a todo. `0` until the row is inserted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl TodoListId {
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl TodoId {
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

/// A todo list owning an ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: TodoListId,
    pub title: String,
    pub description: Option<String>,
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// A list not yet persisted; the store assigns the id on insert.
    pub fn new(title: String, description: Option<String>) -> Self {
        Self {
            id: TodoListId(0),
            title,
            description,
            todos: Vec::new(),
        }
    }
}

/// A todo item. Owned by exactly one list; `list_id` is the foreign key and
/// the only link back to the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    pub list_id: TodoListId,
}

impl Todo {
    /// A todo not yet persisted, attached to `list_id`.
    pub fn new(
        list_id: TodoListId,
        title: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        completed: bool,
    ) -> Self {
        Self {
            id: TodoId(0),
            title,
            description,
            created_at,
            completed,
            list_id,
        }
    }
}
