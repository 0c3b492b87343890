//! # Authentication Middleware
//!
//! Axum middleware that runs the access guard on every request of a route group.
//!
//! [`require_auth`] validates the `Authorization: Bearer <token>` header and injects
//! the decoded [`Claims`] into the request extensions. [`require_manager`] must be
//! layered inside it and rejects identities that are not managers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::{require_auth, require_manager};
//!
//! let manager_routes = Router::new()
//!     .route("/manager/users", get(list_users))
//!     .route_layer(middleware::from_fn(require_manager))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers then extract claims using `Extension<Claims>`:
//!
//! ```rust,ignore
//! async fn list_users(Extension(claims): Extension<Claims>) -> String {
//!     format!("Hello, {}!", claims.email())
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::{authenticate, authenticate_optional, require_role, Claims, TokenCodec, UserRole};
use lib_core::AppError;
use std::sync::Arc;
use tracing::{debug, warn};

fn credential(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}

/// Authentication middleware that requires a valid bearer token.
///
/// # Behavior
///
/// - **Valid token**: continues with `Claims` in the request extensions
/// - **Missing/invalid token**: `401 Unauthorized` with `WWW-Authenticate: Bearer`
pub async fn require_auth(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&codec, credential(&req)).map_err(|e| {
        warn!("[AUTH] Rejected request to {}", req.uri().path());
        AppError::from(e)
    })?;

    debug!("[AUTH] Authenticated {} ({})", claims.email(), claims.role);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Optional authentication for endpoints with mixed public/private behavior.
///
/// Never rejects. Inserts `Claims` only when a valid token is present, so
/// handlers take `Option<Extension<Claims>>`.
pub async fn optional_auth(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(claims) = authenticate_optional(&codec, credential(&req)) {
        debug!("[AUTH] Optional identity {} ({})", claims.email(), claims.role);
        req.extensions_mut().insert(claims);
    }

    next.run(req).await
}

/// Role middleware admitting managers only.
///
/// Expects [`require_auth`] to have run first; without claims the request is
/// treated as unauthenticated.
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(AppError::from(lib_auth::Error::Unauthenticated))?;

    require_role(claims, UserRole::Manager).map_err(|_| {
        warn!("[AUTH] Non-manager denied access to {}", req.uri().path());
        AppError::Forbidden("Only managers can access this resource".to_string())
    })?;

    Ok(next.run(req).await)
}
