//! # Route Distance Service
//!
//! Client for the OpenRouteService directions API.
//!
//! ```text
//! POST {base_url}/v2/directions/driving-car
//! Authorization: <api key>
//!
//! { "coordinates": [[lon1, lat1], [lon2, lat2]] }
//! ```
//!
//! The first route's `summary.distance` (metres) and `summary.duration`
//! (seconds) are returned. Note the API takes `[lon, lat]` pairs.

use lib_core::{
    dto::{DistanceRequest, DistanceResponse},
    AppError, Config,
};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DIRECTIONS_PATH: &str = "/v2/directions/driving-car";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    summary: Summary,
}

// Zero-length routes come back with an empty summary.
#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

/// Directions API client. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouteDistanceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RouteDistanceClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.route_api_url, config.route_api_key.clone())
    }

    fn directions_url(&self) -> String {
        format!("{}{}", self.base_url, DIRECTIONS_PATH)
    }

    /// Fetch the driving distance and duration between two points.
    #[instrument(skip(self))]
    pub async fn route_distance(&self, req: &DistanceRequest) -> Result<DistanceResponse, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENSTREET_API_KEY is not configured".to_string()))?;

        let body = json!({
            "coordinates": [[req.lon1, req.lat1], [req.lon2, req.lat2]]
        });

        debug!("[DISTANCE] Requesting route from {}", self.directions_url());
        let res = self
            .http
            .post(self.directions_url())
            .header(AUTHORIZATION, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Directions request failed: {e}")))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read directions response: {e}")))?;

        if !status.is_success() {
            warn!("[DISTANCE] Directions API returned {}", status);
            return Err(AppError::Upstream(format!("Directions API returned {status}: {text}")));
        }

        parse_directions(&text)
    }
}

/// Extract the first route summary from a directions response body.
pub fn parse_directions(body: &str) -> Result<DistanceResponse, AppError> {
    let parsed: DirectionsResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("Malformed directions response: {e}")))?;

    let route = parsed
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upstream("Directions response contained no route".to_string()))?;

    Ok(DistanceResponse {
        distance_m: route.summary.distance,
        duration_s: route.summary.duration,
    })
}
