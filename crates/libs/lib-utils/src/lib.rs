//! # Utilities Library
//!
//! Shared utility functions for base64url encoding, environment variables, time, and validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::b64u_encode;
pub use envs::{get_env, get_env_opt, get_env_parse};
pub use time::{now_utc, now_timestamp};
pub use validation::{validate_not_empty, validate_email, validate_range};
