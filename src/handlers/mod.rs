//! HTTP request handlers for the georegion API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod codes;
pub mod extent;
pub mod heartbeat;
pub mod region;

pub use codes::codes_handler;
pub use extent::extent_handler;
pub use heartbeat::heartbeat_handler;
pub use region::{region_get_handler, region_post_handler};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::GeoRegionError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the application router with all endpoints and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/region", get(region_get_handler).post(region_post_handler))
        .route("/extent", post(extent_handler))
        .route("/codes", get(codes_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP status for an error returned to a client
fn status_for(error: &GeoRegionError) -> StatusCode {
    match error {
        GeoRegionError::InvalidRegion { .. } | GeoRegionError::InvalidParameter { .. } => {
            StatusCode::BAD_REQUEST
        }
        GeoRegionError::UnknownRegionCode { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed request and turn the error into a JSON response
pub(crate) fn error_response(
    error: &GeoRegionError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(error, endpoint, request_id, params);

    (
        status_for(error),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
