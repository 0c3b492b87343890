//! # Auth Handler Tests
//!
//! Test suite for the registration and login handlers, run through the full router.

mod login;
