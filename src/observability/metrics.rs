//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_routes_mounted_total` (counter): routes attached during the
//!   mount pass, labeled by route name
//! - `router_requests_total` (counter): served requests by method and status
//! - `router_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so call sites never
//!   guard on `metrics_enabled`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a route attached by the mount pass.
pub fn record_route_mounted(route: &str) {
    metrics::counter!("router_routes_mounted_total", "route" => route.to_string()).increment(1);
}

/// Record one served request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("router_requests_total", &labels).increment(1);
    metrics::histogram!("router_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
