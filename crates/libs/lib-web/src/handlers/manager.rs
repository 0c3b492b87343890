//! # Manager Handlers
//!
//! User administration. Both routes sit behind `require_auth` and
//! `require_manager`, so the claims here always carry the manager role.

use axum::extract::{Extension, Json, Path, State};
use lib_auth::Claims;
use lib_core::{
    dto::{DeactivateResponse, UserInfo, UserListResponse},
    model::store::UserRepository,
    AppError, DbPool,
};
use tracing::{info, instrument, warn};

/// `GET /manager/users` - every user, without password hashes.
#[instrument(skip_all, fields(manager = %claims.email()))]
pub async fn list_users(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserListResponse>, AppError> {
    let users = UserRepository::list_all(&pool).await?;
    info!("[MANAGER] Listing {} users", users.len());

    Ok(Json(UserListResponse {
        users: users.iter().map(UserInfo::from).collect(),
        manager: claims.sub,
    }))
}

/// `PATCH /manager/users/{email}/deactivate`
///
/// Deactivating an already inactive user succeeds. Tokens already issued to
/// the user stay valid until they expire.
#[instrument(skip_all, fields(manager = %claims.email(), target = %email))]
pub async fn deactivate_user(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<Json<DeactivateResponse>, AppError> {
    if !UserRepository::set_active(&pool, &email, false).await? {
        warn!("[MANAGER] Deactivation target not found");
        return Err(AppError::NotFound("User not found".to_string()));
    }

    info!("[MANAGER] User deactivated");

    Ok(Json(DeactivateResponse {
        message: format!("User {email} deactivated"),
        manager: claims.sub,
    }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use axum::http::StatusCode;
    use lib_auth::UserRole;

    #[tokio::test]
    async fn test_list_users_as_manager() {
        let app = test_app(setup_test_db().await);
        register_user(&app, "boss@x.com", "pw", UserRole::Manager).await;
        register_user(&app, "a@x.com", "pw", UserRole::Client).await;
        let token = login_token(&app, "boss@x.com", "pw").await;

        let (status, _, body) = send(&app, "GET", "/manager/users", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["manager"], "boss@x.com");
        let users = body["users"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    }

    #[tokio::test]
    async fn test_client_cannot_list_users() {
        let app = test_app(setup_test_db().await);
        register_user(&app, "a@x.com", "pw", UserRole::Client).await;
        let token = login_token(&app, "a@x.com", "pw").await;

        let (status, _, body) = send(&app, "GET", "/manager/users", Some(&token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only managers can access this resource");
        assert_eq!(body["code"], "Forbidden");
    }

    #[tokio::test]
    async fn test_deactivate_blocks_login() {
        let app = test_app(setup_test_db().await);
        register_user(&app, "boss@x.com", "pw", UserRole::Manager).await;
        register_user(&app, "a@x.com", "secret", UserRole::Client).await;
        let manager = login_token(&app, "boss@x.com", "pw").await;
        let client = login_token(&app, "a@x.com", "secret").await;

        let (status, _, body) =
            send(&app, "PATCH", "/manager/users/a@x.com/deactivate", Some(&manager), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User a@x.com deactivated");
        assert_eq!(body["manager"], "boss@x.com");

        let (status, _, body) = send(&app, "POST", "/auth/login", None, Some(login_body("a@x.com", "secret"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "User account is inactive");

        // Issued tokens are not revoked
        let (status, _, body) = send(&app, "GET", "/profile", Some(&client), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], false);

        // Repeating the deactivation still matches the user
        let (status, _, _) =
            send(&app, "PATCH", "/manager/users/a@x.com/deactivate", Some(&manager), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_user() {
        let app = test_app(setup_test_db().await);
        let token = test_codec().issue_default("boss@x.com", UserRole::Manager).unwrap();

        let (status, _, body) =
            send(&app, "PATCH", "/manager/users/nobody@x.com/deactivate", Some(&token), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }
}
