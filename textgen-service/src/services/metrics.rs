//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the text served by /metrics.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one upstream model call.
pub fn record_provider_call(operation: &'static str, model: &str, success: bool, elapsed: Duration) {
    let status = if success { "success" } else { "error" };

    counter!(
        "genai_requests_total",
        "operation" => operation,
        "model" => model.to_string(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "genai_provider_latency_seconds",
        "operation" => operation,
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());
}
