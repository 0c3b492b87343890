//! # Token Codec
//!
//! Issues and validates HS256-signed access tokens carrying the subject email,
//! the user role and an expiry timestamp.
//!
//! The algorithm is pinned: tokens whose header names any other algorithm
//! (including `none`) are rejected. Every failure is reported as
//! [`Error::InvalidToken`].

use crate::error::{Error, Result};
use crate::role::UserRole;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::{now_timestamp, now_utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Role granted at login
    pub role: UserRole,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }
}

/// Signs and verifies access tokens with a process-wide secret.
///
/// Built once at startup and shared read-only between request handlers.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenCodec {
    pub const ALGORITHM: Algorithm = Algorithm::HS256;
    pub const DEFAULT_TTL_MINUTES: i64 = 480;

    /// Create a codec for `secret` with the default 8 hour lifetime.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl: Duration::minutes(Self::DEFAULT_TTL_MINUTES),
        }
    }

    /// Override the lifetime used by [`TokenCodec::issue_default`].
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `email` with `role`, expiring `ttl` from now.
    ///
    /// A zero or negative `ttl` produces a token that is already expired.
    pub fn issue(&self, email: &str, role: UserRole, ttl: Duration) -> Result<String> {
        let exp = now_utc()
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::TokenEncode("Expiry out of range".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: email.to_string(),
            role,
            exp,
        };

        encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| Error::TokenEncode(e.to_string()))
    }

    /// Issue a token with the codec's default lifetime.
    pub fn issue_default(&self, email: &str, role: UserRole) -> Result<String> {
        self.issue(email, role, self.default_ttl)
    }

    /// Verify `token` and return its claims.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| Error::InvalidToken)?
            .claims;

        // Expired at the boundary second too.
        if claims.exp <= now_timestamp() {
            return Err(Error::InvalidToken);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Self::ALGORITHM)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
