//! Point extent endpoint handler.
//!
//! Returns the region that frames a set of points, padded by a margin.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::logging::generate_request_id;
use crate::region::BoundingBox;
use crate::state::AppState;

/// JSON body for the extent endpoint
#[derive(Debug, Deserialize)]
pub struct ExtentRequest {
    /// Points as `[lon, lat]` pairs
    pub points: Vec<[f64; 2]>,
    /// Padding in degrees on every side; the configured default when absent
    pub margin: Option<f64>,
}

/// Response for an extent request
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtentResponse {
    pub bbox: BoundingBox,
    pub gmt: String,
    pub point_count: usize,
}

/// Handle POST /extent requests
pub async fn extent_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExtentRequest>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let margin = request
        .margin
        .unwrap_or(state.config.regions.default_margin);

    debug!(
        endpoint = "/extent",
        request_id = %request_id,
        point_count = request.points.len(),
        margin = margin,
        "Processing extent request"
    );

    let points: Vec<(f64, f64)> = request.points.iter().map(|&[lon, lat]| (lon, lat)).collect();

    match BoundingBox::from_points(&points, margin) {
        Ok(bbox) => {
            info!(
                endpoint = "/extent",
                request_id = %request_id,
                bbox = %bbox,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Extent request successful"
            );

            (
                StatusCode::OK,
                Json(ExtentResponse {
                    gmt: bbox.to_string(),
                    bbox,
                    point_count: points.len(),
                }),
            )
                .into_response()
        }
        Err(error) => {
            let params = format!("points={}, margin={}", points.len(), margin);
            error_response(&error, "/extent", &request_id, Some(&params))
        }
    }
}
