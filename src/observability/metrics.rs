//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define rewrite, composition and request metrics
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `subdomainify_rewrites_total` (counter): inbound requests by rewrite outcome
//! - `subdomainify_urls_composed_total` (counter): composed links by realm
//! - `subdomainify_compose_errors_total` (counter): failed compositions by kind
//! - `subdomainify_requests_total` (counter): dispatched requests by status
//! - `subdomainify_request_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so the library
//!   can be used without the exporter
//! - Labels are static strings to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::compose::error::ComposeError;
use crate::rewrite::rewriter::RewriteOutcome;
use crate::routing::realm::Realm;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_rewrite(outcome: &RewriteOutcome) {
    ::metrics::counter!("subdomainify_rewrites_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_compose(realm: Realm) {
    ::metrics::counter!("subdomainify_urls_composed_total", "realm" => realm.as_str()).increment(1);
}

pub fn record_compose_error(error: &ComposeError) {
    ::metrics::counter!("subdomainify_compose_errors_total", "kind" => error.as_str()).increment(1);
}

pub fn record_request(status: u16, start_time: Instant) {
    ::metrics::counter!("subdomainify_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("subdomainify_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}
