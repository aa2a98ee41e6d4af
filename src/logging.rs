//! Logging utilities for georegion.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::time::Instant;
use tracing::{debug, error, info, warn, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::GeoRegionError;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG`, when set, takes precedence over `log_level`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Run `f`, logging its duration under `operation`
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = Uuid::new_v4();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        duration_us = start.elapsed().as_micros() as u64,
        "Operation completed"
    );

    result
}

/// Log what the country code table holds after loading
pub fn log_code_table_stats(source: &str, code_count: usize) {
    info!(
        operation = "code_table_load",
        source = source,
        code_count = code_count,
        "Country code table loaded"
    );
}

/// Log an error with context
pub fn log_error(error: &GeoRegionError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}

/// Log an error that occurred during request processing.
///
/// Client mistakes (bad regions, unknown codes) are logged at warn level,
/// everything else at error level.
pub fn log_request_error(
    error: &GeoRegionError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    let params = params.unwrap_or("none");
    match error {
        GeoRegionError::InvalidRegion { .. }
        | GeoRegionError::UnknownRegionCode { .. }
        | GeoRegionError::InvalidParameter { .. } => warn!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params,
            "Rejected request"
        ),
        _ => error!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params,
            "Request processing error"
        ),
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id() {
        let id1 = generate_request_id();
        let id2 = generate_request_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_log_timed_operation() {
        let result = log_timed_operation("test_operation", || 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing("debug");
        init_tracing("info");
        log_error(
            &GeoRegionError::invalid_region("test"),
            "logging test",
        );
    }
}
