//! Metrics collection.
//!
//! # Metrics
//! - `gnocall_rpc_requests_total` (counter): RPC calls by method, outcome
//! - `gnocall_rpc_duration_seconds` (histogram): RPC latency by method
//! - `gnocall_broadcasts_total` (counter): broadcast attempts by outcome
//!
//! # Design Decisions
//! - Uses the `metrics` facade only; installing a recorder/exporter is the
//!   embedding application's job, so updates are no-ops otherwise
//! - Outcome labels are static strings to keep cardinality bounded

use std::time::Duration;

/// Record a finished JSON-RPC call.
pub fn record_rpc_call(method: &str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        "gnocall_rpc_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gnocall_rpc_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}

/// Record the terminal outcome of one broadcast attempt.
pub fn record_broadcast(outcome: &'static str) {
    metrics::counter!("gnocall_broadcasts_total", "outcome" => outcome).increment(1);
}
