//! Snapshot types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Detached copy of the collector state at one point in time.
///
/// Holds counts, never live references, so a snapshot taken before further
/// observations stays unchanged. Invariants once any requests have been
/// recorded: `total_requests == successful_requests + failed_requests`,
/// `sum(requests_by_method) == total_requests`, and
/// `sum(errors_by_status) == failed_requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Requests that reached status classification.
    pub total_requests: u64,
    /// Requests that came back with a 2xx status.
    pub successful_requests: u64,
    /// Requests that came back with a non-2xx status.
    pub failed_requests: u64,
    /// Observation count per HTTP method.
    pub requests_by_method: HashMap<String, u64>,
    /// Failure count per non-2xx status code.
    pub errors_by_status: HashMap<u16, u64>,
    /// Every observed latency, in milliseconds, in arrival order.
    pub latencies_ms: Vec<f64>,
    /// Arithmetic mean over `latencies_ms`.
    pub average_latency_ms: f64,
}

impl AnalyticsSnapshot {
    /// True when no observations have been recorded since the last reset.
    pub fn is_zero(&self) -> bool {
        self.total_requests == 0 && self.latencies_ms.is_empty()
    }
}
