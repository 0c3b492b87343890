//! Helpers for handler tests: an in-memory store, a fixed config, the real router.

use crate::server::{create_router, AppState};
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use lib_auth::{TokenCodec, UserRole};
use lib_core::{ensure_schema, Config, DbPool};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Setup test database with schema.
///
/// One connection only: each `:memory:` connection is a separate database.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    ensure_schema(&pool).await.expect("Failed to create users table");
    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_minutes: 480,
        route_api_key: Some("test-route-key".to_string()),
        route_api_url: "http://127.0.0.1:9".to_string(),
    }
}

/// Codec matching [`test_config`], for minting tokens without a login.
pub fn test_codec() -> TokenCodec {
    test_config().token_codec()
}

/// The full router over `pool`.
pub fn test_app(pool: DbPool) -> Router {
    build(pool, test_config())
}

/// The full router with the directions client pointed at `route_api_url`.
pub fn test_app_with_routes(pool: DbPool, route_api_url: &str) -> Router {
    let config = Config {
        route_api_url: route_api_url.to_string(),
        ..test_config()
    };
    build(pool, config)
}

fn build(pool: DbPool, config: Config) -> Router {
    let state = AppState::new(pool, config).expect("Failed to build app state");
    create_router(state, vec!["http://localhost:3000".to_string()])
}

/// Send one request and return status, headers and the JSON body (`Null` if empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch(app, request).await
}

/// POST a raw body with an optional content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    dispatch(app, builder.body(Body::from(body)).unwrap()).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, headers, json)
}

pub fn register_body(email: &str, password: &str, role: UserRole) -> Value {
    json!({
        "email": email,
        "password": password,
        "full_name": "Test User",
        "role": role,
    })
}

pub fn login_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

pub async fn register_user(app: &Router, email: &str, password: &str, role: UserRole) {
    let (status, _, body) =
        send(app, "POST", "/auth/register", None, Some(register_body(email, password, role))).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
}

pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let (status, _, body) = send(app, "POST", "/auth/login", None, Some(login_body(email, password))).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}
