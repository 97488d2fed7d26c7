//! Observation collection and aggregation

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

use crate::AnalyticsSnapshot;

/// Thread-safe accumulator of request observations.
///
/// Every counter touched by one observation is updated under a single write
/// lock, so a concurrent [`snapshot`](AnalyticsCollector::snapshot) never
/// sees a half-applied observation.
#[derive(Debug, Default)]
pub struct AnalyticsCollector {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    total_requests: u64,
    successful_requests: u64,
    failed_requests: u64,
    requests_by_method: HashMap<String, u64>,
    errors_by_status: HashMap<u16, u64>,
    latencies_ms: Vec<f64>,
    average_latency_ms: f64,
}

impl AnalyticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request attempt.
    ///
    /// Success is the conventional 2xx range; any other status also bumps the
    /// per-status failure map. Callers record exactly one observation per
    /// response that reaches status classification and none for requests that
    /// die in the transport.
    pub fn record_observation(&self, method: &str, status: u16, elapsed: Duration) {
        let mut inner = self.inner.write();

        inner.total_requests += 1;
        if (200..300).contains(&status) {
            inner.successful_requests += 1;
        } else {
            inner.failed_requests += 1;
            *inner.errors_by_status.entry(status).or_insert(0) += 1;
        }

        *inner
            .requests_by_method
            .entry(method.to_string())
            .or_insert(0) += 1;

        inner.latencies_ms.push(elapsed.as_secs_f64() * 1000.0);
        // Recomputed over the full retained list, O(n) per observation. The
        // list grows for the life of the process; known scaling limit.
        inner.average_latency_ms =
            inner.latencies_ms.iter().sum::<f64>() / inner.latencies_ms.len() as f64;
    }

    /// Detached copy of the current counters.
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let inner = self.inner.read();
        AnalyticsSnapshot {
            total_requests: inner.total_requests,
            successful_requests: inner.successful_requests,
            failed_requests: inner.failed_requests,
            requests_by_method: inner.requests_by_method.clone(),
            errors_by_status: inner.errors_by_status.clone(),
            latencies_ms: inner.latencies_ms.clone(),
            average_latency_ms: inner.average_latency_ms,
        }
    }

    /// Zero every counter and clear the latency list.
    pub fn reset(&self) {
        *self.inner.write() = Inner::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_invariants() {
        let collector = AnalyticsCollector::new();

        collector.record_observation("GET", 200, Duration::from_millis(50));
        collector.record_observation("GET", 404, Duration::from_millis(10));
        collector.record_observation("POST", 201, Duration::from_millis(100));
        collector.record_observation("PUT", 500, Duration::from_millis(75));

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_requests, 4);
        assert_eq!(snapshot.successful_requests, 2);
        assert_eq!(snapshot.failed_requests, 2);
        assert_eq!(
            snapshot.total_requests,
            snapshot.successful_requests + snapshot.failed_requests
        );
        assert_eq!(
            snapshot.requests_by_method.values().sum::<u64>(),
            snapshot.total_requests
        );
        assert_eq!(
            snapshot.errors_by_status.values().sum::<u64>(),
            snapshot.failed_requests
        );
        assert_eq!(snapshot.requests_by_method["GET"], 2);
        assert_eq!(snapshot.errors_by_status[&404], 1);
        assert_eq!(snapshot.errors_by_status[&500], 1);
    }

    #[test]
    fn test_average_latency() {
        let collector = AnalyticsCollector::new();

        collector.record_observation("GET", 200, Duration::from_millis(10));
        collector.record_observation("GET", 200, Duration::from_millis(20));
        collector.record_observation("GET", 200, Duration::from_millis(30));

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.latencies_ms, vec![10.0, 20.0, 30.0]);
        assert_eq!(snapshot.average_latency_ms, 20.0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let collector = AnalyticsCollector::new();
        collector.record_observation("GET", 200, Duration::from_millis(10));

        let before = collector.snapshot();
        collector.record_observation("GET", 200, Duration::from_millis(10));

        assert_eq!(before.total_requests, 1);
        assert_eq!(collector.snapshot().total_requests, 2);
    }

    #[test]
    fn test_reset_returns_zero_state() {
        let collector = AnalyticsCollector::new();
        collector.record_observation("DELETE", 502, Duration::from_millis(5));
        assert!(!collector.snapshot().is_zero());

        collector.reset();
        let snapshot = collector.snapshot();
        assert!(snapshot.is_zero());
        assert_eq!(snapshot, AnalyticsSnapshot::default());
    }

    #[test]
    fn test_non_2xx_boundaries() {
        let collector = AnalyticsCollector::new();
        collector.record_observation("GET", 199, Duration::from_millis(1));
        collector.record_observation("GET", 299, Duration::from_millis(1));
        collector.record_observation("GET", 300, Duration::from_millis(1));

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.successful_requests, 1);
        assert_eq!(snapshot.failed_requests, 2);
    }
}
