//! # Access Guard
//!
//! Turns a raw `Authorization` header value into an authenticated identity and
//! enforces role requirements on it.
//!
//! ```text
//! Authorization: Bearer <token>
//!        │
//!        ▼
//! authenticate ──► TokenCodec::decode ──► Claims ──► require_role ──► Claims
//!        │                                               │
//!   Unauthenticated                                  Forbidden
//! ```

use crate::error::{Error, Result};
use crate::role::UserRole;
use crate::token::{Claims, TokenCodec};

pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from a `Bearer <token>` credential.
///
/// The scheme is matched case-insensitively. Any other scheme, or an empty
/// token, is [`Error::InvalidCredentialFormat`].
pub fn bearer_token(credential: &str) -> Result<&str> {
    let (scheme, token) = credential
        .trim()
        .split_once(' ')
        .ok_or(Error::InvalidCredentialFormat)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::InvalidCredentialFormat);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::InvalidCredentialFormat);
    }

    Ok(token)
}

/// Require a valid bearer credential.
///
/// A missing or malformed credential, and any token failure, is
/// [`Error::Unauthenticated`]. The underlying cause is not exposed.
pub fn authenticate(codec: &TokenCodec, credential: Option<&str>) -> Result<Claims> {
    let credential = credential.ok_or(Error::Unauthenticated)?;
    let token = bearer_token(credential).map_err(|_| Error::Unauthenticated)?;

    codec.decode(token).map_err(|_| Error::Unauthenticated)
}

/// Like [`authenticate`], but any failure yields `None`.
pub fn authenticate_optional(codec: &TokenCodec, credential: Option<&str>) -> Option<Claims> {
    authenticate(codec, credential).ok()
}

/// Pass `claims` through only if they carry exactly `role`.
pub fn require_role(claims: Claims, role: UserRole) -> Result<Claims> {
    if claims.role == role {
        Ok(claims)
    } else {
        Err(Error::Forbidden)
    }
}
