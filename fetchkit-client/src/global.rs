//! Process-wide default client.
//!
//! Mirrors the [`Client`](crate::Client) API as free functions for callers
//! that want a shared client without threading one through. All state lives
//! in a single slot: [`configure`] swaps in a rebuilt client holding the
//! merged defaults, and [`reset`] restores the pristine state, which keeps
//! test runs independent of each other.
//!
//! Updates are last-write-wins. A request resolves its client (and its
//! logger) once at entry, so reconfiguring mid-flight never affects calls
//! already running.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

use crate::{Client, ConfigPatch, DecodedBody, Logger, RequestOptions, Result};

#[cfg(feature = "analytics")]
use fetchkit_analytics::AnalyticsSnapshot;

static DEFAULT_CLIENT: OnceLock<RwLock<Arc<Client>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Client>> {
    DEFAULT_CLIENT.get_or_init(|| RwLock::new(Arc::new(Client::default_client())))
}

/// Get the current process-wide client.
pub fn client() -> Arc<Client> {
    slot().read().clone()
}

/// Shallow-merge `patch` into the process-wide defaults.
///
/// Headers merge key-by-key with the patch winning; every other key the patch
/// carries replaces the current value. The logger and analytics counters
/// survive the swap. Visible to all subsequent calls on the global surface.
pub fn configure(patch: ConfigPatch) {
    let slot = slot();
    let mut guard = slot.write();
    let merged = guard.config().apply(patch);
    *guard = Arc::new(guard.rebuild(merged));
}

/// Replace the process-wide logger wholesale (no merge). A caller wanting to
/// add one hook without losing others must read-and-recombine on their side.
pub fn configure_logger(logger: impl Logger + 'static) {
    client().set_logger(logger);
}

/// Remove the process-wide logger.
pub fn clear_logger() {
    client().clear_logger();
}

/// Restore the pristine default state: default config, no logger, zeroed
/// analytics.
pub fn reset() {
    *slot().write() = Arc::new(Client::default_client());
}

/// Execute a GET request on the process-wide client.
pub async fn get(url: &str, options: RequestOptions) -> Result<DecodedBody> {
    client().get(url, options).await
}

/// Execute a DELETE request on the process-wide client.
pub async fn delete(url: &str, options: RequestOptions) -> Result<DecodedBody> {
    client().delete(url, options).await
}

/// Execute a HEAD request on the process-wide client.
pub async fn head(url: &str, options: RequestOptions) -> Result<DecodedBody> {
    client().head(url, options).await
}

/// Execute an OPTIONS request on the process-wide client.
pub async fn options(url: &str, options: RequestOptions) -> Result<DecodedBody> {
    client().options(url, options).await
}

/// Execute a POST request with a JSON payload on the process-wide client.
pub async fn post<B: Serialize + ?Sized>(
    url: &str,
    data: &B,
    options: RequestOptions,
) -> Result<DecodedBody> {
    client().post(url, data, options).await
}

/// Execute a PUT request with a JSON payload on the process-wide client.
pub async fn put<B: Serialize + ?Sized>(
    url: &str,
    data: &B,
    options: RequestOptions,
) -> Result<DecodedBody> {
    client().put(url, data, options).await
}

/// Execute a PATCH request with a JSON payload on the process-wide client.
pub async fn patch<B: Serialize + ?Sized>(
    url: &str,
    data: &B,
    options: RequestOptions,
) -> Result<DecodedBody> {
    client().patch(url, data, options).await
}

/// Snapshot of the process-wide request counters.
#[cfg(feature = "analytics")]
pub fn analytics() -> AnalyticsSnapshot {
    client().analytics()
}

/// Zero the process-wide request counters.
#[cfg(feature = "analytics")]
pub fn reset_analytics() {
    client().reset_analytics();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    // The global slot is shared by every test in this binary.
    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_configure_merges_into_defaults() {
        let _guard = LOCK.lock().unwrap();
        reset();

        configure(ConfigPatch::new().header("x-a", "1"));
        configure(
            ConfigPatch::new()
                .header("x-b", "2")
                .timeout(Duration::from_secs(5)),
        );

        let config_headers = client().config().default_headers.clone();
        assert!(config_headers.contains(&("x-a".to_string(), "1".to_string())));
        assert!(config_headers.contains(&("x-b".to_string(), "2".to_string())));
        assert_eq!(client().config().timeout, Duration::from_secs(5));

        reset();
    }

    #[test]
    fn test_reset_restores_defaults() {
        let _guard = LOCK.lock().unwrap();
        reset();

        configure(ConfigPatch::new().base_url("https://api.example.com"));
        assert!(client().config().base_url.is_some());

        reset();
        assert!(client().config().base_url.is_none());
        assert!(client().config().default_headers.is_empty());
    }
}
