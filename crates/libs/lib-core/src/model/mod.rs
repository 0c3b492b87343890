//! # Model Layer
//!
//! Persistent user records and their repository.

pub mod store;
