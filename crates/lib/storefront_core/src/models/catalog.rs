//! Catalog domain models.
//!
//! Serialized with explicit field lists; these structs are the wire schema.

use serde::Serialize;

/// A store. Owns its items: deleting a store cascades to them.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

/// An item belonging to exactly one store.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}

/// A todo item belonging to a user.
#[derive(Debug, Clone, Serialize)]
pub struct TodoItem {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub is_completed: bool,
}
