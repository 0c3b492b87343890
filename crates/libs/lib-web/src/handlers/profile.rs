//! # Profile Handler

use axum::extract::{Extension, Json, State};
use lib_auth::Claims;
use lib_core::{dto::UserInfo, model::store::UserRepository, AppError, DbPool};

/// `GET /profile` - the authenticated user's own record.
///
/// Tokens outlive deactivation and the record itself, so a valid token may
/// still point at nothing.
pub async fn get_profile(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserInfo>, AppError> {
    let user = UserRepository::find_by_email(&pool, claims.email())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserInfo::from(&user)))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use axum::http::StatusCode;
    use lib_auth::UserRole;

    #[tokio::test]
    async fn test_profile_returns_own_record() {
        let app = test_app(setup_test_db().await);
        register_user(&app, "a@x.com", "pw", UserRole::Client).await;
        let token = login_token(&app, "a@x.com", "pw").await;

        let (status, _, body) = send(&app, "GET", "/profile", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["role"], "client");
        assert_eq!(body["is_active"], true);
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_profile_for_missing_record() {
        let pool = setup_test_db().await;
        let token = test_codec().issue_default("ghost@x.com", UserRole::Client).unwrap();

        let (status, _, body) = send(&test_app(pool), "GET", "/profile", Some(&token), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = test_app(setup_test_db().await);

        let (status, headers, body) = send(&app, "GET", "/profile", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers.get("www-authenticate").unwrap(), "Bearer");
        assert_eq!(body["error"], "Could not validate credentials");
    }
}
