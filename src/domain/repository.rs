use async_trait::async_trait;

use super::todo::{Todo, TodoId, TodoList, TodoListId};

/// Persistence seam for lists and todos. Absence of a target is `None`,
/// never an error; `Err` is reserved for store failures.
///
/// Lookups come in two flavors: `get_*` loads a detached copy for
/// read-and-return (lists come with their todos), `find_*` loads the minimal
/// row for a subsequent mutate-and-save (no relations).
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;

    /// Insert a new list and return it with its assigned identifier.
    async fn create_list(&self, list: TodoList) -> anyhow::Result<TodoList>;
    async fn all_lists(&self) -> anyhow::Result<Vec<TodoList>>;
    async fn get_list(&self, id: TodoListId) -> anyhow::Result<Option<TodoList>>;
    async fn find_list(&self, id: TodoListId) -> anyhow::Result<Option<TodoList>>;
    /// Persist title/description and insert any todo in the collection that
    /// has no assigned id yet, as one unit.
    async fn update_list(&self, list: &TodoList) -> anyhow::Result<()>;
    /// Delete the list; the store cascades to its todos.
    async fn delete_list(&self, list: &TodoList) -> anyhow::Result<()>;

    async fn get_todo(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn find_todo(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    /// Persist the completion flag, the todo's only mutable field.
    async fn update_todo(&self, todo: &Todo) -> anyhow::Result<()>;
    async fn delete_todo(&self, todo: &Todo) -> anyhow::Result<()>;
}
