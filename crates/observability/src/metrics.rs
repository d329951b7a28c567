//! Export engine metrics
//!
//! Counters recorded at dispatch and per hub call outcome.

use metrics::counter;

/// Record one dispatched work unit, labeled by content kind
pub fn record_unit_dispatched(kind: &str) {
    counter!(
        "hub_exporter_units_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record a successful unit outcome
pub fn record_export_outcome(kind: &str, outcome: &str) {
    counter!(
        "hub_exporter_outcomes_total",
        "kind" => kind.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a hard unit failure
pub fn record_unit_failed(kind: &str) {
    counter!(
        "hub_exporter_failures_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record the result of one reconciliation delete
///
/// `result` is one of `deleted`, `not_found`, `rejected`, `transport_error`.
pub fn record_delete_result(result: &str) {
    counter!(
        "hub_exporter_deletes_total",
        "result" => result.to_string()
    )
    .increment(1);
}
