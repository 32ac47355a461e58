use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::AppState;
use crate::application::dtos::TodoListDto;
use crate::application::todo_service::TodoService;
use crate::domain::todo::TodoListId;
use crate::http::types::ApiError;

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(all_lists::<S>).post(create_list::<S>))
        .route(
            "/:id",
            get(get_list::<S>).put(update_list::<S>).delete(delete_list::<S>),
        )
        .with_state(state)
}

async fn all_lists<S: TodoService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<TodoListDto>>, ApiError> {
    let lists = state.service.all_lists().await.map_err(ApiError::internal)?;
    Ok(Json(lists))
}

async fn get_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<TodoListDto>, ApiError> {
    let list = state
        .service
        .get_list(TodoListId(id))
        .await
        .map_err(ApiError::internal)?;
    match list {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::not_found()),
    }
}

async fn create_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Json(payload): Json<TodoListDto>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let (id, _) = state
        .service
        .create_list(payload)
        .await
        .map_err(ApiError::internal)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/{}", id.0))],
    ))
}

async fn update_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<TodoListDto>,
) -> Result<StatusCode, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let updated = state
        .service
        .update_list(TodoListId(id), payload)
        .await
        .map_err(ApiError::internal)?;
    match updated {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found()),
    }
}

async fn delete_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .service
        .delete_list(TodoListId(id))
        .await
        .map_err(ApiError::internal)?;
    match deleted {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found()),
    }
}
