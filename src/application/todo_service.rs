use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;

use crate::application::dtos::{TodoDto, TodoListDto};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Todo, TodoId, TodoList, TodoListId};

/// One method per use case. Mutating operations check that the target exists
/// before touching the store and return `None` when it does not.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create_list(&self, dto: TodoListDto) -> Result<(TodoListId, TodoListDto)>;
    async fn all_lists(&self) -> Result<Vec<TodoListDto>>;
    async fn get_list(&self, id: TodoListId) -> Result<Option<TodoListDto>>;
    async fn update_list(&self, id: TodoListId, dto: TodoListDto) -> Result<Option<TodoListDto>>;
    async fn delete_list(&self, id: TodoListId) -> Result<Option<TodoListDto>>;

    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoDto>>;
    async fn create_todo(&self, list_id: TodoListId, dto: TodoDto) -> Result<Option<TodoDto>>;
    async fn toggle_todo(&self, id: TodoId) -> Result<Option<TodoDto>>;
    async fn delete_todo(&self, id: TodoId) -> Result<Option<TodoDto>>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create_list(&self, dto: TodoListDto) -> Result<(TodoListId, TodoListDto)> {
        tracing::info!("creating todo list");
        let list = self
            .repo
            .create_list(TodoList::new(dto.title, dto.description))
            .await?;
        Ok((list.id, TodoListDto::from(&list)))
    }

    async fn all_lists(&self) -> Result<Vec<TodoListDto>> {
        tracing::info!("retrieving all todo lists");
        let lists = self.repo.all_lists().await?;
        Ok(lists.iter().map(TodoListDto::from).collect())
    }

    async fn get_list(&self, id: TodoListId) -> Result<Option<TodoListDto>> {
        tracing::info!(id = id.0, "retrieving todo list");
        match self.repo.get_list(id).await? {
            Some(list) => Ok(Some(TodoListDto::from(&list))),
            None => {
                tracing::warn!(id = id.0, "todo list not found");
                Ok(None)
            }
        }
    }

    async fn update_list(&self, id: TodoListId, dto: TodoListDto) -> Result<Option<TodoListDto>> {
        tracing::info!(id = id.0, "updating todo list");
        let Some(mut list) = self.repo.find_list(id).await? else {
            tracing::warn!(id = id.0, "todo list not found");
            return Ok(None);
        };
        list.title = dto.title;
        list.description = dto.description;
        self.repo.update_list(&list).await?;
        Ok(Some(TodoListDto::from(&list)))
    }

    async fn delete_list(&self, id: TodoListId) -> Result<Option<TodoListDto>> {
        tracing::info!(id = id.0, "deleting todo list");
        let Some(list) = self.repo.find_list(id).await? else {
            tracing::warn!(id = id.0, "todo list not found");
            return Ok(None);
        };
        self.repo.delete_list(&list).await?;
        Ok(Some(TodoListDto::from(&list)))
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoDto>> {
        tracing::info!(id = id.0, "retrieving todo");
        match self.repo.get_todo(id).await? {
            Some(todo) => Ok(Some(TodoDto::from(&todo))),
            None => {
                tracing::warn!(id = id.0, "todo not found");
                Ok(None)
            }
        }
    }

    async fn create_todo(&self, list_id: TodoListId, dto: TodoDto) -> Result<Option<TodoDto>> {
        tracing::info!(list_id = list_id.0, "creating todo");
        let Some(mut list) = self.repo.find_list(list_id).await? else {
            tracing::warn!(id = list_id.0, "todo list not found");
            return Ok(None);
        };
        // The caller's timestamp and completion flag are taken as given; an
        // omitted timestamp binds to the epoch.
        let created_at = dto.created_at.unwrap_or(DateTime::UNIX_EPOCH);
        let todo = Todo::new(list.id, dto.title, dto.description, created_at, dto.completed);
        let created = TodoDto::from(&todo);
        list.todos.push(todo);
        self.repo.update_list(&list).await?;
        Ok(Some(created))
    }

    async fn toggle_todo(&self, id: TodoId) -> Result<Option<TodoDto>> {
        tracing::info!(id = id.0, "toggling todo completion");
        let Some(mut todo) = self.repo.find_todo(id).await? else {
            tracing::warn!(id = id.0, "todo not found");
            return Ok(None);
        };
        todo.completed = !todo.completed;
        self.repo.update_todo(&todo).await?;
        Ok(Some(TodoDto::from(&todo)))
    }

    async fn delete_todo(&self, id: TodoId) -> Result<Option<TodoDto>> {
        tracing::info!(id = id.0, "deleting todo");
        let Some(todo) = self.repo.find_todo(id).await? else {
            tracing::warn!(id = id.0, "todo not found");
            return Ok(None);
        };
        self.repo.delete_todo(&todo).await?;
        Ok(Some(TodoDto::from(&todo)))
    }
}
