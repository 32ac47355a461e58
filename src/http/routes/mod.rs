pub mod todo_lists;
pub mod todos;

use crate::application::todo_service::TodoService;

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
}
