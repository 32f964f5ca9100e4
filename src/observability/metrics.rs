//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vanity_resolutions_total` (counter): resolutions by outcome
//! - `vanity_probe_total` (counter): upstream probes by result
//! - `vanity_probe_duration_seconds` (histogram): upstream probe latency
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus scrape endpoint is optional and off by default

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one resolution (`not_found`, `redirect`, `meta`).
pub fn record_resolution(outcome: &'static str) {
    metrics::counter!("vanity_resolutions_total", "outcome" => outcome).increment(1);
}

/// Record one upstream probe and its latency.
pub fn record_probe(result: &'static str, start: Instant) {
    metrics::counter!("vanity_probe_total", "result" => result).increment(1);
    metrics::histogram!("vanity_probe_duration_seconds").record(start.elapsed().as_secs_f64());
}
