//! Item request handlers.
//!
//! Reads are public; mutations sit behind the auth middleware.

use axum::http::StatusCode;
use axum::{Json, extract::Path, extract::State};
use storefront_core::catalog::queries;
use storefront_core::models::catalog::Item;

use super::non_empty;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{CreateItemRequest, MessageResponse, UpdateItemRequest};

/// `GET /items` — list all items.
pub async fn list_items_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(queries::list_items(&state.pool).await?))
}

/// `GET /items/{item_id}` — fetch a single item.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<Item>> {
    let item = queries::get_item(&state.pool, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".into()))?;
    Ok(Json(item))
}

/// `POST /items` — create an item under a store.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let (name, price, store_id) = match (non_empty(body.name), body.price, body.store_id) {
        (Some(n), Some(p), Some(s)) => (n, p, s),
        _ => {
            return Err(AppError::Validation(
                "Item name, price, and store_id are required".into(),
            ));
        }
    };

    let item = queries::create_item(&state.pool, &name, price, store_id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /items/{item_id}` — update name and/or price. Absent fields are unchanged.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(body): Json<UpdateItemRequest>,
) -> AppResult<Json<Item>> {
    let item = queries::update_item(
        &state.pool,
        item_id,
        non_empty(body.name).as_deref(),
        body.price,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Item not found".into()))?;
    Ok(Json(item))
}

/// `DELETE /items/{item_id}` — delete an item.
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    queries::delete_item(&state.pool, item_id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted".into(),
    }))
}
