//! # Distance Handler

use crate::services::RouteDistanceClient;
use axum::extract::{rejection::JsonRejection, Json, State};
use lib_core::{
    dto::{DistanceRequest, DistanceResponse},
    AppError,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// `POST /distance` - driving distance and duration between two points.
///
/// Coordinates are checked before the directions API is called.
#[instrument(skip_all)]
pub async fn route_distance(
    State(routes): State<Arc<RouteDistanceClient>>,
    body: Result<Json<DistanceRequest>, JsonRejection>,
) -> Result<Json<DistanceResponse>, AppError> {
    let Json(req) = body?;
    req.validate().map_err(AppError::InvalidInput)?;

    let res = routes.route_distance(&req).await?;
    info!("[DISTANCE] {:.0} m, {:.0} s", res.distance_m, res.duration_s);

    Ok(Json(res))
}
