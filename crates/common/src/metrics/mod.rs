//! Metrics helpers
//!
//! Records graph construction and algorithm runs through the `metrics`
//! facade. No exporter is installed here; without a recorder every call is
//! a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Duration;

/// Metrics prefix for all BibGraph metrics
pub const METRICS_PREFIX: &str = "bibgraph";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_graphs_built_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of graphs built"
    );

    describe_histogram!(
        format!("{}_graph_build_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Graph construction latency in seconds"
    );

    describe_histogram!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        Unit::Count,
        "Node count of built graphs"
    );

    describe_histogram!(
        format!("{}_graph_edges", METRICS_PREFIX),
        Unit::Count,
        "Edge count of built graphs"
    );

    describe_counter!(
        format!("{}_algorithm_runs_total", METRICS_PREFIX),
        Unit::Count,
        "Total graph algorithm invocations"
    );

    tracing::info!("Metrics registered");
}

/// Record a finished graph build
pub fn record_graph_build(kind: &'static str, nodes: usize, edges: usize, elapsed: Duration) {
    counter!(
        format!("{}_graphs_built_total", METRICS_PREFIX),
        "kind" => kind
    )
    .increment(1);

    histogram!(
        format!("{}_graph_build_duration_seconds", METRICS_PREFIX),
        "kind" => kind
    )
    .record(elapsed.as_secs_f64());

    histogram!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        "kind" => kind
    )
    .record(nodes as f64);

    histogram!(
        format!("{}_graph_edges", METRICS_PREFIX),
        "kind" => kind
    )
    .record(edges as f64);
}

/// Record an algorithm invocation
pub fn record_algorithm_run(algorithm: &'static str) {
    counter!(
        format!("{}_algorithm_runs_total", METRICS_PREFIX),
        "algorithm" => algorithm
    )
    .increment(1);
}
