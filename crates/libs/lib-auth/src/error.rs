//! # Auth Errors
//!
//! Failure taxonomy shared by the hasher, the token codec and the access guard.
//!
//! Only [`Error::Unauthenticated`] and [`Error::Forbidden`] are meant to cross the
//! guard boundary. Token failures are collapsed into a single
//! [`Error::InvalidToken`] so callers cannot tell expired, tampered and malformed
//! tokens apart.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed stored hash or malformed bearer credential.
    #[error("Invalid credential format")]
    InvalidCredentialFormat,

    /// Signature, algorithm, claim or expiry check failed.
    #[error("Invalid token")]
    InvalidToken,

    /// No usable credential was presented.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Valid identity without the required role.
    #[error("Insufficient role")]
    Forbidden,

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to encode token: {0}")]
    TokenEncode(String),
}
