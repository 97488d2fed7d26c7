//! Request lifecycle hooks.

use crate::{EffectiveOptions, FetchError, Response};
use async_trait::async_trait;

/// Observer for the request lifecycle.
///
/// Every method defaults to a no-op, so implementations override only the
/// hooks they care about. For one request the hooks fire in a fixed order:
/// `on_request` before dispatch, then `on_response` for a successful exchange
/// or `on_error` for a declared or transport failure. A body that fails to
/// decode after a successful exchange sees both: `on_response` first, then
/// `on_error`. Hooks are awaited; the pipeline does not proceed past a hook
/// until it completes.
#[async_trait]
pub trait Logger: Send + Sync {
    /// Called with the merged options before the network call.
    async fn on_request(&self, _url: &str, _options: &EffectiveOptions) {}

    /// Called with the raw response on the success path, before decoding.
    async fn on_response(&self, _url: &str, _response: &Response) {}

    /// Called with the error before it is returned to the caller.
    async fn on_error(&self, _url: &str, _error: &FetchError) {}
}

/// Logger with all hooks left at their no-op defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

#[async_trait]
impl Logger for NoopLogger {}

/// Logger that forwards lifecycle events to `tracing`.
pub struct TracingLogger {
    log_headers: bool,
}

impl TracingLogger {
    /// Create a new tracing logger.
    pub fn new() -> Self {
        Self { log_headers: false }
    }

    /// Also emit request headers at trace level.
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Logger for TracingLogger {
    async fn on_request(&self, url: &str, options: &EffectiveOptions) {
        tracing::debug!(
            method = %options.method,
            url,
            "sending HTTP request"
        );

        if self.log_headers {
            for (name, value) in &options.headers {
                tracing::trace!(
                    header = %name,
                    value = ?value,
                    "request header"
                );
            }
        }
    }

    async fn on_response(&self, url: &str, response: &Response) {
        tracing::debug!(
            status = %response.status(),
            url,
            "received HTTP response"
        );
    }

    async fn on_error(&self, url: &str, error: &FetchError) {
        tracing::warn!(
            error = %error,
            url,
            "request failed"
        );
    }
}
