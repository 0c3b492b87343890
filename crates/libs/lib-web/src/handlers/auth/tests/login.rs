//! # Login Handler Tests

use crate::handlers::test_support::*;
use axum::http::StatusCode;
use lib_auth::UserRole;
use lib_core::dto::ErrorResponse;

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let app = test_app(setup_test_db().await);
    register_user(&app, "alice@example.com", "SecurePassword123!", UserRole::Manager).await;

    // Act
    let (status, headers, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(login_body("alice@example.com", "SecurePassword123!")),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role"], "manager");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");

    let claims = test_codec().decode(body["access_token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.email(), "alice@example.com");
    assert_eq!(claims.role, UserRole::Manager);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app(setup_test_db().await);
    register_user(&app, "alice@example.com", "right", UserRole::Client).await;

    let (status, headers, body) =
        send(&app, "POST", "/auth/login", None, Some(login_body("alice@example.com", "wrong"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers.get("www-authenticate").unwrap(), "Bearer");
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_same_message() {
    let app = test_app(setup_test_db().await);

    let (status, _, body) =
        send(&app, "POST", "/auth/login", None, Some(login_body("nobody@example.com", "pw"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let app = test_app(setup_test_db().await);
    register_user(&app, "alice@example.com", "pw", UserRole::Client).await;

    let (status, _, _) =
        send(&app, "POST", "/auth/login", None, Some(login_body("Alice@Example.com", "pw"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_field_is_json_error() {
    let app = test_app(setup_test_db().await);

    let (status, headers, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        error,
        ErrorResponse {
            error: "Invalid request body".to_string(),
            code: "InvalidInput".to_string(),
        }
    );
}

#[tokio::test]
async fn test_login_non_json_body() {
    let app = test_app(setup_test_db().await);

    let (status, _, body) =
        post_raw(&app, "/auth/login", Some("application/json"), "email=a@x.com&password=pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Malformed JSON body");
    assert_eq!(body["code"], "InvalidInput");

    let (status, _, body) =
        post_raw(&app, "/auth/login", Some("text/plain"), r#"{"email":"a@x.com","password":"pw"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Expected Content-Type: application/json");

    let (status, _, body) = post_raw(&app, "/auth/login", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
}

#[tokio::test]
async fn test_login_error_body_hides_serde_detail() {
    let app = test_app(setup_test_db().await);

    let (_, _, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": 42, "password": "pw" })),
    )
    .await;

    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("invalid type"));
    assert!(!message.contains("line 1"));
}
