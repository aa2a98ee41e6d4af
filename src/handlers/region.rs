//! Region resolution endpoint handlers.
//!
//! Resolves a region descriptor into a bounding box, either from a query
//! string (`GET /region?region=JP+r3`) or from a JSON body whose `region` is
//! a descriptor string or a list of four numbers.
//!
//! Form decoding turns an unescaped `+` in a query string into a space.
//! Descriptors never contain spaces, so the GET handler maps them back.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::Result;
use crate::logging::{generate_request_id, log_timed_operation};
use crate::region::{resolve, BoundingBox, RegionInput};
use crate::state::AppState;

/// Query parameters for the region endpoint
#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    /// Region descriptor, e.g. `10/20/35/45`, `d`, `JP+r3`
    pub region: String,
}

/// JSON body for the region endpoint
#[derive(Debug, Deserialize)]
pub struct RegionRequest {
    pub region: RegionInput,
}

/// Response for a resolved region
#[derive(Debug, Serialize, Deserialize)]
pub struct RegionResponse {
    /// The region as it was requested
    pub region: String,
    /// Resolved bounds
    pub bbox: BoundingBox,
    /// Bounds in `west/east/south/north` form
    pub gmt: String,
}

/// Handle GET /region requests
pub async fn region_get_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegionQuery>,
) -> Response {
    let region = restore_plus_signs(&params.region);
    handle_region(&state, RegionInput::Text(region), "GET /region")
}

/// Handle POST /region requests
pub async fn region_post_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegionRequest>,
) -> Response {
    handle_region(&state, request.region, "POST /region")
}

fn handle_region(state: &AppState, input: RegionInput, endpoint: &str) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let input_str = input.to_string();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        region = %input_str,
        "Processing region request"
    );

    match log_timed_operation("resolve_region", || resolve_input(state, &input)) {
        Ok(bbox) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                region = %input_str,
                bbox = %bbox,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Region request successful"
            );

            (
                StatusCode::OK,
                Json(RegionResponse {
                    region: input_str,
                    gmt: bbox.to_string(),
                    bbox,
                }),
            )
                .into_response()
        }
        Err(error) => error_response(&error, endpoint, &request_id, Some(&input_str)),
    }
}

/// Undo form decoding of `+` as a space in a query-string descriptor
fn restore_plus_signs(region: &str) -> String {
    region.trim().replace(' ', "+")
}

fn resolve_input(state: &AppState, input: &RegionInput) -> Result<BoundingBox> {
    let descriptor = input.to_descriptor()?;
    resolve(&descriptor, &state.codes)
}
