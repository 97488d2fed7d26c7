// Fetchkit - a thin convenience wrapper around a platform HTTP client
//
// This library provides verb shortcuts, layered configuration merging,
// pluggable lifecycle hooks, and content-type driven response decoding.

// Re-export the client surface
pub use fetchkit_client::*;

// Re-export optional crates
#[cfg(feature = "analytics")]
pub use fetchkit_analytics;
