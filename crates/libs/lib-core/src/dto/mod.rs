//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the REST API.

pub mod auth;
pub mod distance;
pub mod manager;

pub use auth::*;
pub use distance::*;
pub use manager::*;
