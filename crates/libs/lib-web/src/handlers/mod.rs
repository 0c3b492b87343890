//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers delegate persistence to
//! the user store in `lib-core`, credentials to `lib-auth`, and external calls to
//! [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Registration and login (public)
//!   - `POST /auth/register` - Create a user account
//!   - `POST /auth/login` - Exchange email/password for a bearer token
//!
//! - **[`profile`]**: Current user (authenticated)
//!   - `GET /profile`
//!
//! - **[`distance`]**: Driving distance between two points (authenticated)
//!   - `POST /distance`
//!
//! - **[`manager`]**: User administration (manager role)
//!   - `GET /manager/users`
//!   - `PATCH /manager/users/{email}/deactivate`
//!
//! ## Handler Architecture
//!
//! All handlers follow Axum's extractor pattern and return `AppError` on failure:
//!
//! ```rust,ignore
//! async fn handler(
//!     State(db): State<DbPool>,              // Shared state
//!     Extension(claims): Extension<Claims>,  // Set by require_auth
//!     body: Result<Json<RequestBody>, JsonRejection>,
//! ) -> Result<Json<Response>, AppError> {
//!     let Json(payload) = body?;             // 400 InvalidInput on a bad body
//!     Ok(Json(response))
//! }
//! ```

pub mod auth;
pub mod distance;
pub mod manager;
pub mod profile;

use axum::{http::Uri, Json};
use lib_core::{
    dto::{HealthResponse, MessageResponse},
    AppError,
};
use tracing::info;

/// `GET /`
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Cuba Payment API".to_string(),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    info!("[404 HANDLER] Unmatched route {}", uri.path());
    AppError::NotFound("Route not found".to_string())
}

#[cfg(test)]
pub(crate) mod test_support;
