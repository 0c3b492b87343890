//! # Services Layer
//!
//! Integrations with external services, kept apart from the HTTP handlers:
//!
//! ```text
//! Handlers (HTTP) → Services → External APIs
//! ```
//!
//! - [`distance`] - Driving distance/duration via the OpenRouteService directions API
//!
//! Services return `Result<T, AppError>` and convert transport and payload
//! failures into [`AppError::Upstream`](lib_core::AppError::Upstream).

pub mod distance;

pub use distance::RouteDistanceClient;
