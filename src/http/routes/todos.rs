use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::AppState;
use crate::application::dtos::TodoDto;
use crate::application::todo_service::TodoService;
use crate::domain::todo::{TodoId, TodoListId};
use crate::http::types::ApiError;

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    // One path, two meanings: POST takes the parent list id, the other verbs
    // take the todo's own id.
    Router::new()
        .route(
            "/todo/:id",
            get(get_todo::<S>)
                .post(create_todo::<S>)
                .delete(delete_todo::<S>)
                .patch(toggle_todo::<S>),
        )
        .with_state(state)
}

async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<TodoDto>, ApiError> {
    let todo = state
        .service
        .get_todo(TodoId(id))
        .await
        .map_err(ApiError::internal)?;
    match todo {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::not_found()),
    }
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(list_id): Path<i64>,
    Json(payload): Json<TodoDto>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let created = state
        .service
        .create_todo(TodoListId(list_id), payload)
        .await
        .map_err(ApiError::internal)?;
    match created {
        Some(dto) => Ok((StatusCode::CREATED, Json(dto))),
        None => Err(ApiError::not_found()),
    }
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .service
        .delete_todo(TodoId(id))
        .await
        .map_err(ApiError::internal)?;
    match deleted {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found()),
    }
}

async fn toggle_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let toggled = state
        .service
        .toggle_todo(TodoId(id))
        .await
        .map_err(ApiError::internal)?;
    match toggled {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found()),
    }
}
