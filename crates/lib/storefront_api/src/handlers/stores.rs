//! Store request handlers.
//!
//! Reads are public; mutations sit behind the auth middleware.

use axum::http::StatusCode;
use axum::{Json, extract::Path, extract::State};
use storefront_core::catalog::queries;
use storefront_core::models::catalog::Store;
use tracing::info;

use super::non_empty;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{CreateStoreRequest, MessageResponse, UpdateStoreRequest};

/// `GET /stores` — list all stores.
pub async fn list_stores_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Store>>> {
    Ok(Json(queries::list_stores(&state.pool).await?))
}

/// `GET /stores/{store_id}` — fetch a single store.
pub async fn get_store_handler(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<Store>> {
    let store = queries::get_store(&state.pool, store_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".into()))?;
    Ok(Json(store))
}

/// `POST /stores` — create a new store.
pub async fn create_store_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateStoreRequest>,
) -> AppResult<(StatusCode, Json<Store>)> {
    let name =
        non_empty(body.name).ok_or_else(|| AppError::Validation("Store name is required".into()))?;

    let store = queries::create_store(&state.pool, &name).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// `PUT /stores/{store_id}` — rename a store. Absent fields are unchanged.
pub async fn update_store_handler(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
    Json(body): Json<UpdateStoreRequest>,
) -> AppResult<Json<Store>> {
    let store = queries::rename_store(&state.pool, store_id, non_empty(body.name).as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".into()))?;
    Ok(Json(store))
}

/// `DELETE /stores/{store_id}` — delete a store and, via cascade, its items.
pub async fn delete_store_handler(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    queries::delete_store(&state.pool, store_id).await?;
    info!(store_id, "store deleted");
    Ok(Json(MessageResponse {
        message: "Store deleted successfully".into(),
    }))
}
