//! Authentication request handlers.

use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json, extract::State};
use storefront_core::auth::AuthError;
use storefront_core::auth::{jwt, password, queries};
use storefront_core::models::auth::{TokenType, UserProfile};
use tracing::info;

use super::non_empty;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthenticatedUser, bearer_token};
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, RefreshResponse, RegisterRequest,
    RegisterResponse, RevokeRequest,
};

/// `POST /register` — create a new user account and issue an access token.
///
/// The insert and the token issuance commit as one transaction: if issuance
/// fails, no user row is left behind.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let (username, email, password) = match (
        non_empty(body.username),
        non_empty(body.email),
        non_empty(body.password),
    ) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        _ => {
            return Err(AppError::Validation(
                "Username, email, and password are required".into(),
            ));
        }
    };

    // Advisory pre-check; the unique constraint still decides under races.
    if queries::email_exists(&state.pool, &email).await? {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let password_hash = password::hash_password(&password)?;

    let mut tx = state.pool.begin().await?;
    let user_id = queries::create_user(&mut *tx, &username, &email, &password_hash).await?;
    let access_token = jwt::issue_token(
        user_id,
        TokenType::Access,
        state.config.access_ttl_secs,
        state.config.jwt_secret.as_bytes(),
    )?;
    tx.commit().await?;

    info!(user_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user_id,
            access_token,
        }),
    ))
}

/// `POST /login` — authenticate with email + password.
///
/// Unknown email and wrong password produce the same outcome, so the
/// response never reveals which accounts exist.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (email, password) = match (non_empty(body.email), non_empty(body.password)) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return Err(AppError::Validation(
                "Email and password are required".into(),
            ));
        }
    };

    let row = queries::find_user_by_email(&state.pool, &email).await?;
    let (user_id, _username, password_hash) = row.ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&password, &password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let secret = state.config.jwt_secret.as_bytes();
    let access_token = jwt::issue_token(
        user_id,
        TokenType::Access,
        state.config.access_ttl_secs,
        secret,
    )?;
    let refresh_token = jwt::issue_token(
        user_id,
        TokenType::Refresh,
        state.config.refresh_ttl_secs,
        secret,
    )?;

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        access_token,
        refresh_token,
    }))
}

/// `POST /refresh` — exchange a refresh token (Bearer) for a new access token.
///
/// The old refresh token stays valid until expiry or revocation; refreshing
/// never revives an expired or revoked token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<RefreshResponse>> {
    let token = bearer_token(&headers)?;
    let claims = jwt::verify_token(token, state.config.jwt_secret.as_bytes())?;

    if state.revocation.is_revoked(&claims.jti) {
        return Err(AuthError::TokenRevoked.into());
    }

    if claims.token_type != TokenType::Refresh {
        return Err(AuthError::WrongTokenType.into());
    }

    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    let access_token = jwt::issue_token(
        user_id,
        TokenType::Access,
        state.config.access_ttl_secs,
        state.config.jwt_secret.as_bytes(),
    )?;

    Ok(Json(RefreshResponse { access_token }))
}

/// `POST /logout` — revoke the presented access token's jti. Idempotent.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<MessageResponse>> {
    state.revocation.revoke(&user.0.jti);
    Ok(Json(MessageResponse {
        message: "Successfully logged out".into(),
    }))
}

/// `POST /revoke` — revoke an arbitrary jti.
///
/// Any authenticated caller may revoke any jti; there is deliberately no
/// ownership or admin check here.
pub async fn revoke_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Json(body): Json<RevokeRequest>,
) -> AppResult<Json<MessageResponse>> {
    let jti = non_empty(body.jti)
        .ok_or_else(|| AppError::Validation("Token JTI is required".into()))?;

    state.revocation.revoke(&jti);
    info!(%jti, "token revoked");

    Ok(Json(MessageResponse {
        message: format!("Token with JTI {jti} has been revoked"),
    }))
}

/// `GET /profile` — profile of the authenticated user.
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<UserProfile>> {
    let user_id = user
        .0
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    let profile = queries::get_user_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(profile))
}
