//! Catalog database queries.

use sqlx::PgPool;

use super::CatalogError;
use crate::models::catalog::{Item, Store, TodoItem};

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// List all stores.
pub async fn list_stores(pool: &PgPool) -> Result<Vec<Store>, CatalogError> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM stores ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| Store { id, name }).collect())
}

/// Fetch a single store by ID.
pub async fn get_store(pool: &PgPool, store_id: i64) -> Result<Option<Store>, CatalogError> {
    let row = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM stores WHERE id = $1")
        .bind(store_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id, name)| Store { id, name }))
}

/// Create a store. A duplicate name maps to `Conflict`.
pub async fn create_store(pool: &PgPool, name: &str) -> Result<Store, CatalogError> {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO stores (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CatalogError::Conflict(format!("Store with name '{name}' already exists"))
            }
            _ => CatalogError::Db(e),
        })?;
    Ok(Store {
        id,
        name: name.to_string(),
    })
}

/// Rename a store. A `None` name leaves it unchanged (returns the current row).
pub async fn rename_store(
    pool: &PgPool,
    store_id: i64,
    name: Option<&str>,
) -> Result<Option<Store>, CatalogError> {
    let row = sqlx::query_as::<_, (i64, String)>(
        "UPDATE stores SET name = COALESCE($2, name) WHERE id = $1 RETURNING id, name",
    )
    .bind(store_id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => CatalogError::Conflict(
            format!("Store with name '{}' already exists", name.unwrap_or_default()),
        ),
        _ => CatalogError::Db(e),
    })?;
    Ok(row.map(|(id, name)| Store { id, name }))
}

/// Delete a store. Items referencing it go with it (`ON DELETE CASCADE`).
pub async fn delete_store(pool: &PgPool, store_id: i64) -> Result<(), CatalogError> {
    let result = sqlx::query("DELETE FROM stores WHERE id = $1")
        .bind(store_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogError::NotFound("Store"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// List all items.
pub async fn list_items(pool: &PgPool) -> Result<Vec<Item>, CatalogError> {
    let rows = sqlx::query_as::<_, (i64, String, f64, i64)>(
        "SELECT id, name, price, store_id FROM items ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(id, name, price, store_id)| Item {
            id,
            name,
            price,
            store_id,
        })
        .collect())
}

/// Fetch a single item by ID.
pub async fn get_item(pool: &PgPool, item_id: i64) -> Result<Option<Item>, CatalogError> {
    let row = sqlx::query_as::<_, (i64, String, f64, i64)>(
        "SELECT id, name, price, store_id FROM items WHERE id = $1",
    )
    .bind(item_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, name, price, store_id)| Item {
        id,
        name,
        price,
        store_id,
    }))
}

/// Create an item under a store. A missing store surfaces as the foreign-key
/// violation on `store_id` and maps to `NotFound`.
pub async fn create_item(
    pool: &PgPool,
    name: &str,
    price: f64,
    store_id: i64,
) -> Result<Item, CatalogError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO items (name, price, store_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(store_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            CatalogError::NotFound("Store")
        }
        _ => CatalogError::Db(e),
    })?;
    Ok(Item {
        id,
        name: name.to_string(),
        price,
        store_id,
    })
}

/// Partially update an item; `None` fields keep their current value.
pub async fn update_item(
    pool: &PgPool,
    item_id: i64,
    name: Option<&str>,
    price: Option<f64>,
) -> Result<Option<Item>, CatalogError> {
    let row = sqlx::query_as::<_, (i64, String, f64, i64)>(
        "UPDATE items SET name = COALESCE($2, name), price = COALESCE($3, price) \
         WHERE id = $1 RETURNING id, name, price, store_id",
    )
    .bind(item_id)
    .bind(name)
    .bind(price)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, name, price, store_id)| Item {
        id,
        name,
        price,
        store_id,
    }))
}

/// Delete an item by ID.
pub async fn delete_item(pool: &PgPool, item_id: i64) -> Result<(), CatalogError> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(item_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogError::NotFound("Item"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Todo items
// ---------------------------------------------------------------------------

/// List all todo items.
pub async fn list_todos(pool: &PgPool) -> Result<Vec<TodoItem>, CatalogError> {
    let rows = sqlx::query_as::<_, (i64, String, i64, bool)>(
        "SELECT id, content, user_id, is_completed FROM todo_items ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(id, content, user_id, is_completed)| TodoItem {
            id,
            content,
            user_id,
            is_completed,
        })
        .collect())
}

/// Create a todo item for a user. A missing user surfaces as the foreign-key
/// violation on `user_id` and maps to `NotFound`.
pub async fn create_todo(
    pool: &PgPool,
    content: &str,
    user_id: i64,
) -> Result<TodoItem, CatalogError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO todo_items (content, user_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            CatalogError::NotFound("User")
        }
        _ => CatalogError::Db(e),
    })?;
    Ok(TodoItem {
        id,
        content: content.to_string(),
        user_id,
        is_completed: false,
    })
}

/// Partially update a todo item; `None` fields keep their current value.
pub async fn update_todo(
    pool: &PgPool,
    todo_id: i64,
    content: Option<&str>,
    is_completed: Option<bool>,
) -> Result<Option<TodoItem>, CatalogError> {
    let row = sqlx::query_as::<_, (i64, String, i64, bool)>(
        "UPDATE todo_items SET content = COALESCE($2, content), \
         is_completed = COALESCE($3, is_completed) \
         WHERE id = $1 RETURNING id, content, user_id, is_completed",
    )
    .bind(todo_id)
    .bind(content)
    .bind(is_completed)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, content, user_id, is_completed)| TodoItem {
        id,
        content,
        user_id,
        is_completed,
    }))
}

/// Delete a todo item by ID.
pub async fn delete_todo(pool: &PgPool, todo_id: i64) -> Result<(), CatalogError> {
    let result = sqlx::query("DELETE FROM todo_items WHERE id = $1")
        .bind(todo_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogError::NotFound("Todo item"));
    }
    Ok(())
}
