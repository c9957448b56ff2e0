//! Metrics collection and exposition.
//!
//! # Metrics
//! - `books_requests_total` (counter): requests by `outcome`
//!   (`rejected`, `failed`, `succeeded`)
//! - `books_upstream_duration_seconds` (histogram): outbound call latency
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Terminal state of one books request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rejected,
    Failed,
    Succeeded,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
            Outcome::Succeeded => "succeeded",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(outcome: Outcome) {
    metrics::counter!("books_requests_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_upstream_duration(start: Instant) {
    metrics::histogram!("books_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
