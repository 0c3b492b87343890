//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the auth, profile and status endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /auth/register` - [`RegisterRequest`] -> [`UserInfo`]
//! - `POST /auth/login` - [`LoginRequest`] -> [`TokenResponse`]
//! - `GET /profile` - [`UserInfo`]
//!
//! ## Login Flow
//!
//! ```text
//! POST /auth/login
//! Content-Type: application/json
//!
//! { "email": "alice@example.com", "password": "MyPassword123!" }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "token_type": "bearer",
//!   "role": "client"
//! }
//! ```

use crate::model::store::User;
use lib_auth::UserRole;
use serde::{Deserialize, Serialize};

/// Registration request. `role` defaults to `client`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Login request with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Access token issued at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
    pub role: UserRole,
}

impl TokenResponse {
    pub fn bearer(access_token: String, role: UserRole) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            role,
        }
    }
}

/// Public view of a user record. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Error body produced by `AppError`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_role_defaults_to_client() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"pw","full_name":"A"}"#,
        )
        .unwrap();
        assert_eq!(req.role, UserRole::Client);

        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"pw","full_name":"A","role":"manager"}"#,
        )
        .unwrap();
        assert_eq!(req.role, UserRole::Manager);
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse::bearer("t".into(), UserRole::Client)).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["role"], "client");
        assert_eq!(json["access_token"], "t");
    }
}
