//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_responses_total` (counter): responses by method, status, outcome
//! - `api_response_duration_seconds` (histogram): time from header stage to response
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label for responses built by the success stage.
pub const OUTCOME_SUCCESS: &str = "success";
/// Outcome label for responses built by the error stage.
pub const OUTCOME_ERROR: &str = "error";

/// Install the Prometheus recorder and serve the scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one normalized response.
pub fn record_response(method: &str, status: u16, outcome: &'static str, elapsed: Duration) {
    ::metrics::counter!(
        "api_responses_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    ::metrics::histogram!(
        "api_response_duration_seconds",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .record(elapsed.as_secs_f64());
}
