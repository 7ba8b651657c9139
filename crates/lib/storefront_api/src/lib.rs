//! # storefront_api
//!
//! HTTP API library for Storefront.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use sqlx::PgPool;
use storefront_core::auth::revocation::RevocationStore;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, items, stores, todos};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Revocation registry for token jtis.
    pub revocation: Arc<dyn RevocationStore>,
}

/// Run embedded database migrations.
///
/// Delegates to `storefront_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    storefront_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required). Catalog reads and todos are
    // unauthenticated; /refresh validates its own bearer as a refresh token.
    let public = Router::new()
        .route("/register", post(auth::register_handler))
        .route("/login", post(auth::login_handler))
        .route("/refresh", post(auth::refresh_handler))
        .route("/stores", get(stores::list_stores_handler))
        .route("/stores/{store_id}", get(stores::get_store_handler))
        .route("/items", get(items::list_items_handler))
        .route("/items/{item_id}", get(items::get_item_handler))
        .route(
            "/todos",
            get(todos::list_todos_handler).post(todos::create_todo_handler),
        )
        .route(
            "/todos/{todo_id}",
            put(todos::update_todo_handler).delete(todos::delete_todo_handler),
        );

    // Protected routes (require a valid, unrevoked access token)
    let protected = Router::new()
        .route("/profile", get(auth::profile_handler))
        .route("/logout", post(auth::logout_handler))
        .route("/revoke", post(auth::revoke_handler))
        .route("/stores", post(stores::create_store_handler))
        .route(
            "/stores/{store_id}",
            put(stores::update_store_handler).delete(stores::delete_store_handler),
        )
        .route("/items", post(items::create_item_handler))
        .route(
            "/items/{item_id}",
            put(items::update_item_handler).delete(items::delete_item_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
