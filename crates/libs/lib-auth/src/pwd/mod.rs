//! # Password Hashing
//!
//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...`) that embed the algorithm
//! parameters and a random salt, so verification needs nothing but the stored
//! string. Both operations are CPU bound; async callers should run them on a
//! blocking thread.

use crate::error::{Error, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::OnceLock;

/// Memory cost in KiB (64 MiB).
const MEMORY_COST_KIB: u32 = 64 * 1024;
/// Number of passes over memory.
const TIME_COST: u32 = 3;
const PARALLELISM: u32 = 1;

fn argon2() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| Error::Hash(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password using the Argon2id algorithm with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Hash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored hash.
///
/// Returns [`Error::InvalidCredentialFormat`] if `hash` is not a parseable PHC string.
pub fn check_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| Error::InvalidCredentialFormat)?;

    // Parameters come from the parsed hash, not from the instance.
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    check_password(password, hash).unwrap_or(false)
}

/// Hash with the production parameters, created on first use.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    DUMMY_HASH.get_or_init(|| hash_password("dummy-password-never-matches").unwrap_or_default())
}

/// Run a full verification against a throwaway hash and return `false`.
///
/// Call it when no stored hash exists for a login, so that an unknown account
/// costs the same Argon2 work as a wrong password.
pub fn verify_dummy_password(password: &str) -> bool {
    let _ = verify_password(password, dummy_hash());
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "TestPassword123!";
        let hash = hash_password(password).expect("Password hashing should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(password, &hash));
        assert!(!verify_password("WrongPassword", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = hash_password("pw").unwrap();
        let second = hash_password("pw").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("pw", &first));
        assert!(verify_password("pw", &second));
    }

    #[test]
    fn test_short_and_empty_passwords_hash() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash));
        assert!(!verify_password(" ", &hash));
    }

    #[test]
    fn test_malformed_hash() {
        assert!(!verify_password("pw", "not-a-hash"));
        assert!(!verify_password("pw", ""));
        assert_eq!(
            check_password("pw", "not-a-hash"),
            Err(Error::InvalidCredentialFormat)
        );
    }

    #[test]
    fn test_dummy_hash_uses_production_params() {
        let real = hash_password("pw").unwrap();
        let params = "$argon2id$v=19$m=65536,t=3,p=1$";

        assert!(real.starts_with(params));
        assert!(dummy_hash().starts_with(params));
        assert!(PasswordHash::new(dummy_hash()).is_ok());
    }

    #[test]
    fn test_dummy_verification_never_matches() {
        assert!(!verify_dummy_password("dummy-password-never-matches"));
        assert!(!verify_dummy_password(""));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("s3cret-value").unwrap();
        assert!(!hash.contains("s3cret-value"));
    }
}
