//! HTTP client and the request pipeline.

use http::Method;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::decode::{self, DecodedBody};
use crate::logger::NoopLogger;
use crate::request::{build_url, EffectiveOptions, RequestOptions};
use crate::{ClientConfig, FetchError, Logger, Response, Result};

#[cfg(feature = "analytics")]
use fetchkit_analytics::{AnalyticsCollector, AnalyticsSnapshot};
#[cfg(feature = "analytics")]
use std::time::Instant;

/// Thin convenience wrapper around a `reqwest::Client`.
///
/// Executes one request at a time through a fixed pipeline: merge options,
/// invoke lifecycle hooks around a single network call, classify the outcome,
/// decode the body by content type. No retries, no request coalescing, no
/// cancellation; repeated identical calls produce independent network calls.
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    config: Arc<ClientConfig>,
    logger: Arc<RwLock<Option<Arc<dyn Logger>>>>,
    #[cfg(feature = "analytics")]
    analytics: Arc<AnalyticsCollector>,
}

impl Client {
    /// Create a new client with the given configuration.
    ///
    /// Transport-level settings (timeouts, pools, compression, redirects) are
    /// consumed here; per-request defaults (headers, base URL) are read on
    /// every call.
    pub fn new(config: ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent);

        if config.gzip {
            builder = builder.gzip(true);
        }
        if config.brotli {
            builder = builder.brotli(true);
        }
        builder = if config.follow_redirects {
            builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        } else {
            builder.redirect(reqwest::redirect::Policy::none())
        };

        let inner = builder.build().expect("Failed to build HTTP transport");

        Self {
            inner,
            config: Arc::new(config),
            logger: Arc::new(RwLock::new(None)),
            #[cfg(feature = "analytics")]
            analytics: Arc::new(AnalyticsCollector::new()),
        }
    }

    /// Create a new client with default configuration.
    pub fn default_client() -> Self {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replace the client-wide logger wholesale. A per-request logger still
    /// supersedes it for that single call.
    pub fn set_logger(&self, logger: impl Logger + 'static) {
        *self.logger.write() = Some(Arc::new(logger));
    }

    /// Remove the client-wide logger.
    pub fn clear_logger(&self) {
        *self.logger.write() = None;
    }

    /// Rebuild the transport with a new config, carrying over the logger and
    /// analytics state. Used when global defaults are reconfigured.
    pub(crate) fn rebuild(&self, config: ClientConfig) -> Self {
        let next = Self::new(config);
        *next.logger.write() = self.logger.read().clone();
        #[cfg(feature = "analytics")]
        let next = Self {
            analytics: self.analytics.clone(),
            ..next
        };
        next
    }

    /// Snapshot of the request counters.
    #[cfg(feature = "analytics")]
    pub fn analytics(&self) -> AnalyticsSnapshot {
        self.analytics.snapshot()
    }

    /// Zero the request counters.
    #[cfg(feature = "analytics")]
    pub fn reset_analytics(&self) {
        self.analytics.reset();
    }

    /// Execute a GET request.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<DecodedBody> {
        self.request(url, options.method(Method::GET)).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<DecodedBody> {
        self.request(url, options.method(Method::DELETE)).await
    }

    /// Execute a HEAD request.
    pub async fn head(&self, url: &str, options: RequestOptions) -> Result<DecodedBody> {
        self.request(url, options.method(Method::HEAD)).await
    }

    /// Execute an OPTIONS request.
    pub async fn options(&self, url: &str, options: RequestOptions) -> Result<DecodedBody> {
        self.request(url, options.method(Method::OPTIONS)).await
    }

    /// Execute a POST request with a JSON payload.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<DecodedBody> {
        self.request(url, json_payload(data, options.method(Method::POST))?)
            .await
    }

    /// Execute a PUT request with a JSON payload.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<DecodedBody> {
        self.request(url, json_payload(data, options.method(Method::PUT))?)
            .await
    }

    /// Execute a PATCH request with a JSON payload.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &B,
        options: RequestOptions,
    ) -> Result<DecodedBody> {
        self.request(url, json_payload(data, options.method(Method::PATCH))?)
            .await
    }

    /// Execute one request end-to-end.
    ///
    /// The pipeline: resolve the logger, merge options, `on_request`, dispatch,
    /// classify the outcome, decode on success, and route every error through
    /// `on_error` exactly once before returning it unchanged.
    pub async fn request(&self, url: &str, mut options: RequestOptions) -> Result<DecodedBody> {
        // Resolved once at entry; swapping the client logger mid-flight must
        // not affect this call.
        let logger: Arc<dyn Logger> = options
            .logger
            .take()
            .or_else(|| self.logger.read().clone())
            .unwrap_or_else(|| Arc::new(NoopLogger));

        let effective = EffectiveOptions::merge(&self.config, &options);

        logger.on_request(url, &effective).await;

        let result = match self.dispatch(url, &options, &effective).await {
            Ok(response) if response.is_success() => {
                logger.on_response(url, &response).await;
                decode::decode(&response, self.config.unsupported_body)
            }
            Ok(response) => Err(FetchError::Status {
                status: response.status().as_u16(),
                status_text: response.status_text().to_string(),
            }),
            Err(error) => Err(error),
        };

        if let Err(error) = &result {
            logger.on_error(url, error).await;
        }

        result
    }

    /// Perform the network call. Analytics observe every response that
    /// reaches status classification, ok or not; transport failures never do.
    async fn dispatch(
        &self,
        url: &str,
        options: &RequestOptions,
        effective: &EffectiveOptions,
    ) -> Result<Response> {
        let url = build_url(self.config.base_url.as_deref(), url, &options.query)?;
        debug!(method = %effective.method, url = %url, "dispatching request");

        let mut request = self.inner.request(effective.method.clone(), url);
        for (name, value) in &effective.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &effective.body {
            request = request.body(body.clone());
        }
        if let Some(timeout) = effective.timeout {
            request = request.timeout(timeout);
        }
        let request = request
            .build()
            .map_err(|e| FetchError::RequestBuild(e.to_string()))?;

        #[cfg(feature = "analytics")]
        let started = Instant::now();

        let response = self.inner.execute(request).await?;
        let response = Response::from_reqwest(response).await?;

        #[cfg(feature = "analytics")]
        self.analytics.record_observation(
            effective.method.as_str(),
            response.status().as_u16(),
            started.elapsed(),
        );

        debug!(status = %response.status(), "received response");
        Ok(response)
    }
}

/// JSON-encode `data` into the body, injecting the content type unless the
/// per-request options already set one.
fn json_payload<B: Serialize + ?Sized>(
    data: &B,
    mut options: RequestOptions,
) -> Result<RequestOptions> {
    let body = serde_json::to_vec(data).map_err(|e| FetchError::Json(e.to_string()))?;
    if !options.headers.contains_key(http::header::CONTENT_TYPE) {
        options = options.header("content-type", "application/json");
    }
    Ok(options.body(body))
}

impl Default for Client {
    fn default() -> Self {
        Self::default_client()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Client::default();
        assert!(client.config().gzip);
        assert!(client.config().brotli);
    }

    #[test]
    fn test_client_with_config() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .build();

        let client = Client::new(config);
        assert_eq!(
            client.config().base_url.as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn test_json_payload_injects_content_type() {
        let options = json_payload(&serde_json::json!({"a": 1}), RequestOptions::new()).unwrap();
        assert_eq!(
            options.headers.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_json_payload_keeps_explicit_content_type() {
        let options = json_payload(
            &serde_json::json!({"a": 1}),
            RequestOptions::new().header("content-type", "application/vnd.custom+json"),
        )
        .unwrap();
        assert_eq!(
            options.headers.get("content-type").unwrap(),
            "application/vnd.custom+json"
        );
    }
}
