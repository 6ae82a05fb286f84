//! Prometheus metrics for the company search service.
//!
//! Exposes an HTTP endpoint for Prometheus scraping.

use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Initialize the metrics system and return the Prometheus handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    describe_histogram!(
        "company_search_latency_ms",
        "Time taken for company search operations in milliseconds"
    );
    describe_counter!(
        "company_search_total",
        "Total number of search requests processed"
    );
    describe_counter!(
        "company_search_errors_total",
        "Total number of search errors"
    );

    PrometheusBuilder::new().install_recorder()
}

/// Record a search latency measurement.
pub fn record_search_latency(latency_ms: f64) {
    histogram!("company_search_latency_ms").record(latency_ms);
}

/// Increment the search count.
pub fn increment_search_count() {
    counter!("company_search_total").increment(1);
}

/// Increment the search error count.
pub fn increment_search_errors() {
    counter!("company_search_errors_total").increment(1);
}

/// Create an Axum router for the metrics HTTP endpoint.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || std::future::ready(handle.render())))
}

/// Start the metrics HTTP server on the given port with auto-detect binding.
pub async fn start_metrics_server(port: u16, handle: PrometheusHandle) -> std::io::Result<()> {
    let app = metrics_router(handle);

    // Try dual-stack first, fall back to IPv4-only
    if let Ok(listener) = tokio::net::TcpListener::bind(("::", port)).await {
        info!(port = port, bind = "::", "Starting metrics server (dual-stack)");
        return axum::serve(listener, app).await;
    }

    info!(port = port, bind = "0.0.0.0", "Starting metrics server (IPv4-only fallback)");
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    axum::serve(listener, app).await
}
