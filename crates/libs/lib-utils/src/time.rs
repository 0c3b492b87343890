//! # Time Utilities
//!
//! Utilities for reading the current time using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC time as Unix epoch seconds.
pub fn now_timestamp() -> i64 {
    now_utc().timestamp()
}
