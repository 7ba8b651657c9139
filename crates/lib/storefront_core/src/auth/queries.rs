//! Credential-store database queries.

use sqlx::{PgConnection, PgPool};

use super::AuthError;
use crate::models::auth::UserProfile;

/// Insert a new user, returning the generated ID.
///
/// Takes a connection rather than the pool so registration can run inside a
/// transaction. A unique-constraint violation on username or email maps to
/// `AuthError::Conflict` — the constraint, not any pre-check, decides under
/// concurrent registrations.
pub async fn create_user(
    conn: &mut PgConnection,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, AuthError> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(conn)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::Conflict,
        _ => AuthError::Db(e),
    })
}

/// Fetch a user by email, returning (id, username, password_hash).
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(i64, String, String)>, AuthError> {
    let row = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, username, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch a user profile by ID.
pub async fn get_user_by_id(pool: &PgPool, user_id: i64) -> Result<Option<UserProfile>, AuthError> {
    let row = sqlx::query_as::<_, (i64, String, String, chrono::DateTime<chrono::Utc>)>(
        "SELECT id, username, email, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, username, email, created_at)| UserProfile {
        id,
        username,
        email,
        created_at,
    }))
}

/// Check whether an email is already registered.
///
/// Advisory only — `create_user` still enforces uniqueness at write time.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
