//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_requests_total` (counter): requests by route, tier, method, status
//! - `catalog_request_duration_seconds` (histogram): latency by route and tier
//! - `catalog_route_misses_total` (counter): Not Found / Method Not Allowed
//!
//! # Design Decisions
//! - Labels use the internal route name, never the raw path
//! - Recording is a no-op until a recorder is installed

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a request that reached a route.
pub fn record_request(route: &str, tier: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "catalog_requests_total",
        "route" => route.to_string(),
        "tier" => tier.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "catalog_request_duration_seconds",
        "route" => route.to_string(),
        "tier" => tier.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a request no route accepted.
pub fn record_miss(method: &str, status: u16) {
    metrics::counter!(
        "catalog_route_misses_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
