//! # Authentication Library
//!
//! Password hashing, signed access tokens, and role-gated access checks.
//!
//! - [`pwd`]: Argon2id credential hashing
//! - [`token`]: HS256 token issuance and validation ([`TokenCodec`])
//! - [`guard`]: bearer credential authentication and role enforcement
//! - [`role`]: the [`UserRole`] enum carried in tokens and user records

pub mod error;
pub mod guard;
pub mod pwd;
pub mod role;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use guard::{authenticate, authenticate_optional, bearer_token, require_role};
pub use pwd::{check_password, hash_password, verify_dummy_password, verify_password};
pub use role::UserRole;
pub use token::{Claims, TokenCodec};
