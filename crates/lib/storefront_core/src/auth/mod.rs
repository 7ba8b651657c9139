//! Authentication and token-lifecycle logic.
//!
//! Provides password hashing, JWT management, the revocation registry,
//! and credential-store queries shared with the HTTP layer.

pub mod jwt;
pub mod password;
pub mod queries;
pub mod revocation;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username or email already exists")]
    Conflict,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("The token has expired")]
    TokenExpired,

    #[error("Signature verification failed")]
    TokenInvalid,

    #[error("The token has been revoked")]
    TokenRevoked,

    #[error("Wrong token type")]
    WrongTokenType,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
