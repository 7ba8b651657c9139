//! API request and response models.
//!
//! Hand-written with exhaustive field lists so the wire schema is explicit
//! rather than derived from the storage schema. Request fields are `Option`
//! so missing keys surface as the API's own validation error instead of a
//! deserializer rejection.

use serde::{Deserialize, Serialize};

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable kind (e.g. `unauthorized`).
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
    pub access_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RevokeRequest {
    pub jti: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub store_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTodoRequest {
    pub content: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTodoRequest {
    pub content: Option<String>,
    pub is_completed: Option<bool>,
}
