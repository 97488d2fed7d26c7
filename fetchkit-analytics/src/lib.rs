//! # Fetchkit Analytics
//!
//! In-process request counters for the fetchkit HTTP client: one observation
//! per completed request attempt, folded into per-method and per-status
//! counts plus retained latencies.
//!
//! The collector is deliberately small. It is not an exporter and has no
//! backend; callers pull an [`AnalyticsSnapshot`] and ship it wherever they
//! like.
//!
//! # Usage
//!
//! ```rust
//! use fetchkit_analytics::AnalyticsCollector;
//! use std::time::Duration;
//!
//! let collector = AnalyticsCollector::new();
//! collector.record_observation("GET", 200, Duration::from_millis(42));
//! collector.record_observation("POST", 500, Duration::from_millis(120));
//!
//! let snapshot = collector.snapshot();
//! assert_eq!(snapshot.total_requests, 2);
//! assert_eq!(snapshot.successful_requests, 1);
//! assert_eq!(snapshot.failed_requests, 1);
//! ```

mod collector;
mod snapshot;

pub use collector::AnalyticsCollector;
pub use snapshot::AnalyticsSnapshot;
