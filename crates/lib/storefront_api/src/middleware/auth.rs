//! Authentication middleware — Bearer token extraction and JWT verification.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use storefront_core::auth::AuthError;
use storefront_core::auth::jwt::verify_token;
use storefront_core::models::auth::{TokenClaims, TokenType};

use crate::AppState;
use crate::error::AppError;

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))
}

/// Axum middleware: extracts the bearer token, verifies the JWT, checks the
/// jti against the revocation registry, and injects `AuthenticatedUser` into
/// request extensions. Only access tokens pass; refresh tokens do not
/// authorize API calls.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;

    let claims = verify_token(token, state.config.jwt_secret.as_bytes())?;

    if state.revocation.is_revoked(&claims.jti) {
        return Err(AuthError::TokenRevoked.into());
    }

    if claims.token_type != TokenType::Access {
        return Err(AuthError::WrongTokenType.into());
    }

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
