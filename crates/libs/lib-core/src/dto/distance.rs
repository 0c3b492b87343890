//! # Route Distance Data Transfer Objects

use serde::{Deserialize, Serialize};

/// Two points, in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistanceRequest {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

impl DistanceRequest {
    /// Check that every coordinate is a finite, in-range latitude or longitude.
    pub fn validate(&self) -> Result<(), String> {
        use lib_utils::validate_range;

        validate_range(self.lat1, -90.0, 90.0, "lat1")?;
        validate_range(self.lon1, -180.0, 180.0, "lon1")?;
        validate_range(self.lat2, -90.0, 90.0, "lat2")?;
        validate_range(self.lon2, -180.0, 180.0, "lon2")
    }
}

/// Driving route length and duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistanceResponse {
    /// Metres
    pub distance_m: f64,
    /// Seconds
    pub duration_s: f64,
}
