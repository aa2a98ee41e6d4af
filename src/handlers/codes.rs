//! Country code listing endpoint handler.
//!
//! Returns every ISO code the server can resolve, with its bounds.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::logging::generate_request_id;
use crate::region::BoundingBox;
use crate::state::AppState;

/// One entry of the code listing
#[derive(Debug, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub bbox: BoundingBox,
}

/// Response for GET /codes
#[derive(Debug, Serialize, Deserialize)]
pub struct CodesResponse {
    pub count: usize,
    pub codes: Vec<CodeEntry>,
}

/// Handle GET /codes requests
pub async fn codes_handler(State(state): State<Arc<AppState>>) -> Json<CodesResponse> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/codes",
        request_id = %request_id,
        "Processing codes request"
    );

    let codes: Vec<CodeEntry> = state
        .codes
        .iter()
        .map(|(code, bbox)| CodeEntry {
            code: code.to_string(),
            bbox: *bbox,
        })
        .collect();

    info!(
        endpoint = "/codes",
        request_id = %request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        code_count = codes.len(),
        "Codes request successful"
    );

    Json(CodesResponse {
        count: codes.len(),
        codes,
    })
}
