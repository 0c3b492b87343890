//! # Authentication Handlers
//!
//! HTTP request handlers for registration and login.
//!
//! ## Overview
//!
//! - Registration validates the input, hashes the password with Argon2id and
//!   stores an active user with the requested role (default `client`).
//! - Login verifies the password and issues a bearer token carrying the user's
//!   email and role.
//!
//! Hashing and verification are CPU bound and run on the blocking thread pool.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//!
//! let app = Router::new()
//!     .route("/auth/register", post(register))
//!     .route("/auth/login", post(login))
//!     .with_state(state);
//! ```

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_auth::{hash_password, verify_dummy_password, verify_password, TokenCodec};
use lib_core::{
    dto::{LoginRequest, RegisterRequest, TokenResponse, UserInfo},
    model::store::{UserForCreate, UserRepository},
    AppError, DbPool,
};
use lib_utils::{validate_email, validate_not_empty};
use std::sync::Arc;
use tokio::task::{spawn_blocking, JoinError};
use tracing::{debug, field::Empty, info, instrument, warn, Span};

const EMAIL_TAKEN: &str = "Email already registered";
const BAD_CREDENTIALS: &str = "Invalid email or password";

fn join_error(e: JoinError) -> AppError {
    AppError::Internal(format!("Password task failed: {e}"))
}

/// Register handler - creates a new, active user account.
///
/// # Returns
///
/// * `201 Created` with the public [`UserInfo`] of the new user
/// * `400 Bad Request` on a malformed body, an invalid email, an empty name,
///   or an email that is already registered
#[instrument(skip_all, fields(email = Empty, role = Empty))]
pub async fn register(
    State(pool): State<DbPool>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserInfo>), AppError> {
    let Json(req) = body?;
    Span::current()
        .record("email", req.email.as_str())
        .record("role", req.role.as_str());
    info!("[REGISTER] New registration request");

    validate_email(&req.email).map_err(AppError::InvalidInput)?;
    validate_not_empty(&req.full_name, "full_name").map_err(AppError::InvalidInput)?;

    if UserRepository::find_by_email(&pool, &req.email).await?.is_some() {
        warn!("[REGISTER] Email already registered");
        return Err(AppError::InvalidInput(EMAIL_TAKEN.to_string()));
    }

    debug!("[REGISTER] Hashing password...");
    let password = req.password;
    let password_hash = spawn_blocking(move || hash_password(&password))
        .await
        .map_err(join_error)??;

    let new_user = UserForCreate::new(req.email, req.full_name, password_hash, req.role);

    // A concurrent registration can still win between the lookup and the insert.
    let user = UserRepository::create(&pool, &new_user).await.map_err(|e| {
        let duplicate = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if duplicate {
            AppError::InvalidInput(EMAIL_TAKEN.to_string())
        } else {
            AppError::from(e)
        }
    })?;

    info!("[REGISTER] User created");

    Ok((StatusCode::CREATED, Json(UserInfo::from(&user))))
}

/// Login handler - exchanges email and password for an access token.
///
/// # Returns
///
/// * `200 OK` with a [`TokenResponse`]
/// * `401 Unauthorized` for an unknown email or a wrong password (same message
///   for both)
/// * `403 Forbidden` when the credentials are right but the account is inactive
///
/// Unknown emails still pay for a full Argon2 verification.
#[instrument(skip_all, fields(email = Empty))]
pub async fn login(
    State(pool): State<DbPool>,
    State(codec): State<Arc<TokenCodec>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = body?;
    Span::current().record("email", req.email.as_str());
    info!("[LOGIN] Login attempt");

    let user = UserRepository::find_by_email(&pool, &req.email).await?;

    debug!("[LOGIN] Verifying password...");
    let password = req.password;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let is_valid = spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => verify_dummy_password(&password),
    })
    .await
    .map_err(join_error)?;

    let user = match user {
        Some(user) if is_valid => user,
        Some(_) => {
            warn!("[LOGIN] Invalid password");
            return Err(AppError::Unauthenticated(BAD_CREDENTIALS.to_string()));
        }
        None => {
            warn!("[LOGIN] Unknown email");
            return Err(AppError::Unauthenticated(BAD_CREDENTIALS.to_string()));
        }
    };

    if !user.is_active {
        warn!("[LOGIN] Account is inactive");
        return Err(AppError::Forbidden("User account is inactive".to_string()));
    }

    let token = codec.issue_default(&user.email, user.role)?;

    info!("[LOGIN] User authenticated as {}", user.role);

    Ok(Json(TokenResponse::bearer(token, user.role)))
}

#[cfg(test)]
mod tests;
