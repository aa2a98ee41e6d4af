//! Heartbeat endpoint handler.
//!
//! Returns server status information: uptime, memory usage and the size of
//! the loaded country table.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> = once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (RFC 3339)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Process memory usage in bytes, where the platform reports it
    pub memory_usage_bytes: Option<u64>,
    /// Number of ISO codes the server can resolve
    pub code_count: usize,
    /// Server status
    pub status: String,
}

/// Record the server start time; later heartbeats report uptime from here
pub fn mark_start() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        memory_usage_bytes: get_memory_usage(),
        code_count: state.codes.len(),
        status: "healthy".to_string(),
    })
}

/// Resident set size of this process
#[cfg(target_os = "linux")]
fn get_memory_usage() -> Option<u64> {
    // Second field of /proc/self/statm is RSS in pages
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn get_memory_usage() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::region::CountryTable;

    #[tokio::test]
    async fn test_heartbeat_response() {
        mark_start();
        let state = AppState::new_shared(Config::default(), CountryTable::builtin());

        let Json(response) = heartbeat_handler(State(state.clone())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.code_count, state.codes.len());
        assert!(!response.server_id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());

        // Server ID is stable across calls
        let Json(again) = heartbeat_handler(State(state)).await;
        assert_eq!(again.server_id, response.server_id);
    }
}
