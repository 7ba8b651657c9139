//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Invalid email or password",
            ),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Internal(detail) => {
                // Details go to the log, never to the client.
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<storefront_core::auth::AuthError> for AppError {
    fn from(e: storefront_core::auth::AuthError) -> Self {
        use storefront_core::auth::AuthError;
        match e {
            AuthError::Conflict => AppError::Conflict("Username or email already exists".into()),
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::TokenExpired
            | AuthError::TokenInvalid
            | AuthError::TokenRevoked
            | AuthError::WrongTokenType => {
                // One coarse category on the wire; the precise cause stays in the logs.
                tracing::debug!(cause = %e, "token rejected");
                AppError::Unauthorized("Invalid or expired token".into())
            }
            AuthError::Validation(m) => AppError::Validation(m),
            AuthError::Db(e) => AppError::from(e),
            AuthError::Internal(m) => AppError::Internal(m),
        }
    }
}

impl From<storefront_core::catalog::CatalogError> for AppError {
    fn from(e: storefront_core::catalog::CatalogError) -> Self {
        use storefront_core::catalog::CatalogError;
        match e {
            CatalogError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            CatalogError::Conflict(m) => AppError::Conflict(m),
            CatalogError::Db(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::auth::AuthError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            status_of(AppError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn every_token_failure_collapses_to_unauthorized() {
        for cause in [
            AuthError::TokenExpired,
            AuthError::TokenInvalid,
            AuthError::TokenRevoked,
            AuthError::WrongTokenType,
        ] {
            match AppError::from(cause) {
                AppError::Unauthorized(m) => assert_eq!(m, "Invalid or expired token"),
                other => panic!("expected Unauthorized, got {other:?}"),
            }
        }
    }
}
