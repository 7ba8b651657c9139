//! Todo-item request handlers.
//!
//! Todos are not JWT-guarded.

use axum::http::StatusCode;
use axum::{Json, extract::Path, extract::State};
use storefront_core::catalog::queries;
use storefront_core::models::catalog::TodoItem;

use super::non_empty;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{CreateTodoRequest, MessageResponse, UpdateTodoRequest};

/// `GET /todos` — list all todo items.
pub async fn list_todos_handler(State(state): State<AppState>) -> AppResult<Json<Vec<TodoItem>>> {
    Ok(Json(queries::list_todos(&state.pool).await?))
}

/// `POST /todos` — create a todo item for a user.
pub async fn create_todo_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<TodoItem>)> {
    let (content, user_id) = match (non_empty(body.content), body.user_id) {
        (Some(c), Some(u)) => (c, u),
        _ => {
            return Err(AppError::Validation(
                "Todo content and user_id are required".into(),
            ));
        }
    };

    let todo = queries::create_todo(&state.pool, &content, user_id).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PUT /todos/{todo_id}` — update content and/or completion flag.
pub async fn update_todo_handler(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
    Json(body): Json<UpdateTodoRequest>,
) -> AppResult<Json<TodoItem>> {
    let todo = queries::update_todo(
        &state.pool,
        todo_id,
        non_empty(body.content).as_deref(),
        body.is_completed,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Todo item not found".into()))?;
    Ok(Json(todo))
}

/// `DELETE /todos/{todo_id}` — delete a todo item.
pub async fn delete_todo_handler(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    queries::delete_todo(&state.pool, todo_id).await?;
    Ok(Json(MessageResponse {
        message: "Todo item deleted".into(),
    }))
}
