//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by pipeline outcome and status
//! - `gateway_request_duration_seconds` (histogram): dispatch latency
//!
//! Outcomes: `dispatched`, `preflight`, `cors_denied`, `invalid_params`,
//! `invalid_body`, `body_too_large`, `not_found`.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(address = %addr, error = %err, "Failed to start metrics exporter"),
    }
}

pub fn record_outcome(outcome: &'static str, status: StatusCode) {
    metrics::counter!(
        "gateway_requests_total",
        "outcome" => outcome,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

pub fn record_latency(outcome: &'static str, start: Instant) {
    metrics::histogram!("gateway_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
