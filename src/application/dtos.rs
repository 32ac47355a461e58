use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::todo::{Todo, TodoId, TodoList, TodoListId};

pub const TITLE_MAX: usize = 20;
pub const DESCRIPTION_MAX: usize = 100;

/// Field-length violation in a request body. Checked at the transport
/// boundary before the service runs; the domain layer does not re-validate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    TitleMissing,
    #[error("title must be at most {TITLE_MAX} characters")]
    TitleTooLong,
    #[error("description must be at most {DESCRIPTION_MAX} characters")]
    DescriptionTooLong,
}

fn validate_fields(title: &str, description: Option<&str>) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleMissing);
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ValidationError::TitleTooLong);
    }
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(ValidationError::DescriptionTooLong);
        }
    }
    Ok(())
}

/// External shape of a todo list. The id is ignored on input and populated
/// on output; the owned todo collection is never exposed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoListId>,
    pub title: String,
    pub description: Option<String>,
}

impl TodoListDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.description.as_deref())
    }
}

/// External shape of a todo item. Carries no reference to the owning list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.description.as_deref())
    }
}

impl From<&TodoList> for TodoListDto {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id.is_assigned().then_some(list.id),
            title: list.title.clone(),
            description: list.description.clone(),
        }
    }
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.is_assigned().then_some(todo.id),
            title: todo.title.clone(),
            description: todo.description.clone(),
            created_at: Some(todo.created_at),
            completed: todo.completed,
        }
    }
}
