//! Router-level tests for the auth surface.
//!
//! Uses a lazy pool: none of the paths exercised here reach the database,
//! so the full middleware/handler stack runs without a live PostgreSQL.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sqlx::postgres::PgPoolOptions;
use storefront_api::AppState;
use storefront_api::config::ApiConfig;
use storefront_core::auth::jwt;
use storefront_core::auth::revocation::InMemoryRevocationStore;
use storefront_core::models::auth::TokenType;
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn test_app() -> Router {
    let database_url = "postgres://localhost:5432/storefront_test";
    let pool = PgPoolOptions::new()
        .connect_lazy(database_url)
        .expect("lazy pool");

    let state = AppState {
        pool,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: database_url.into(),
            jwt_secret: SECRET.into(),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 86400,
        },
        revocation: Arc::new(InMemoryRevocationStore::new()),
    };
    storefront_api::router(state)
}

fn post_json(uri: &str, body: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn access_token(user_id: i64) -> String {
    jwt::issue_token(user_id, TokenType::Access, 3600, SECRET.as_bytes()).unwrap()
}

fn refresh_token(user_id: i64) -> String {
    jwt::issue_token(user_id, TokenType::Refresh, 86400, SECRET.as_bytes()).unwrap()
}

#[tokio::test]
async fn register_with_missing_fields_is_400() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_json("/register", r#"{"username": "alice"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn register_with_empty_fields_is_400() {
    let app = test_app();
    let (status, _) = send(
        &app,
        post_json(
            "/register",
            r#"{"username": "alice", "email": "", "password": "pw123456"}"#,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_missing_fields_is_400() {
    let app = test_app();
    let (status, body) = send(&app, post_json("/login", r#"{"email": "a@x.com"}"#, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Email and password are required");
}

#[tokio::test]
async fn profile_without_token_is_401() {
    let app = test_app();
    let (status, body) = send(&app, get("/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn profile_with_garbage_token_is_401() {
    let app = test_app();
    let (status, body) = send(&app, get("/profile", Some("not.a.jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn non_bearer_scheme_is_401() {
    let app = test_app();
    let req = Request::builder()
        .method("GET")
        .uri("/profile")
        .header(header::AUTHORIZATION, "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401() {
    let app = test_app();
    let token = jwt::issue_token(1, TokenType::Access, 0, SECRET.as_bytes()).unwrap();
    let (status, body) = send(&app, get("/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn refresh_token_does_not_authorize_api_calls() {
    let app = test_app();
    let token = refresh_token(1);
    let (status, _) = send(&app, get("/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_rejects_access_tokens() {
    let app = test_app();
    let token = access_token(1);
    let (status, body) = send(&app, post_json("/refresh", "", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn refresh_issues_a_usable_access_token() {
    let app = test_app();
    let token = refresh_token(42);
    let (status, body) = send(&app, post_json("/refresh", "", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let minted = body["access_token"].as_str().expect("access_token");
    let claims = jwt::verify_token(minted, SECRET.as_bytes()).unwrap();
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.user_id(), Some(42));
}

#[tokio::test]
async fn logout_then_reuse_is_401() {
    let app = test_app();
    let token = access_token(1);

    let (status, _) = send(&app, post_json("/logout", "", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    // Same token, now revoked.
    let (status, body) = send(&app, get("/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn logout_twice_rejects_the_second_call() {
    // The first logout revokes the jti, so the second presentation of the
    // same token no longer authenticates — revocation itself is idempotent,
    // but a revoked token cannot log out again.
    let app = test_app();
    let token = access_token(1);

    let (status, _) = send(&app, post_json("/logout", "", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, post_json("/logout", "", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn revoke_without_jti_is_400() {
    let app = test_app();
    let token = access_token(1);
    let (status, body) = send(&app, post_json("/revoke", "{}", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Token JTI is required");
}

#[tokio::test]
async fn any_caller_can_revoke_any_jti() {
    let app = test_app();
    let caller = access_token(1);
    let victim = access_token(2);
    let victim_jti = jwt::verify_token(&victim, SECRET.as_bytes()).unwrap().jti;

    let body = format!(r#"{{"jti": "{victim_jti}"}}"#);
    let (status, _) = send(&app, post_json("/revoke", &body, Some(&caller))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/profile", Some(&victim))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn revoking_a_jti_twice_is_a_no_op() {
    let app = test_app();
    let caller = access_token(1);
    let body = r#"{"jti": "some-jti"}"#;

    let (status, _) = send(&app, post_json("/revoke", body, Some(&caller))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, post_json("/revoke", body, Some(&caller))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_mutations_require_auth() {
    let app = test_app();

    let (status, _) = send(&app, post_json("/stores", r#"{"name": "Acme"}"#, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        post_json(
            "/items",
            r#"{"name": "Widget", "price": 9.99, "store_id": 1}"#,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_create_store_still_validates_input() {
    // Auth passes, then validation runs — before any database access.
    let app = test_app();
    let token = access_token(1);
    let (status, body) = send(&app, post_json("/stores", "{}", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn todo_creation_validates_input() {
    let app = test_app();
    let (status, _) = send(&app, post_json("/todos", r#"{"content": "x"}"#, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
