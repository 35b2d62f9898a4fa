//! Metrics collection and exposition.
//!
//! # Metrics
//! - `feed_requests_total` (counter): feed requests by outcome
//! - `feed_request_duration_seconds` (histogram): end-to-end handler latency
//! - `upstream_requests_total` (counter): series API calls by outcome
//! - `upstream_request_duration_seconds` (histogram): series API latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must run inside the Tokio runtime; the exporter spawns its listener there.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled feed request.
pub fn record_feed_request(outcome: &'static str, start_time: Instant) {
    counter!("feed_requests_total", "outcome" => outcome).increment(1);
    histogram!("feed_request_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record one upstream series API call.
pub fn record_upstream_request(outcome: &'static str, start_time: Instant) {
    counter!("upstream_requests_total", "outcome" => outcome).increment(1);
    histogram!("upstream_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}
