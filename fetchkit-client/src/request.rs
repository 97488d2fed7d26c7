//! Per-request options and option merging.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::{ClientConfig, FetchError, Logger, Result};

/// Options for a single request. Constructed fresh per call, never persisted.
#[derive(Default)]
pub struct RequestOptions {
    pub(crate) method: Option<Method>,
    pub(crate) headers: HeaderMap,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Bytes>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) logger: Option<Arc<dyn Logger>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the HTTP method. The verb shortcuts set this themselves.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header to the request. Invalid names or values are dropped.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = Some(Bytes::from(text.into().into_bytes()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                self.body = Some(Bytes::from(bytes));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize JSON body");
            }
        }
        self
    }

    /// Set the request body as form data.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                self.body = Some(Bytes::from(encoded.into_bytes()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode form data");
            }
        }
        self
    }

    /// Set a custom timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set bearer authentication.
    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.header("authorization", format!("Bearer {}", token.into()))
    }

    /// Set basic authentication.
    pub fn basic_auth(
        self,
        username: impl Into<String>,
        password: Option<impl Into<String>>,
    ) -> Self {
        use base64::Engine;
        let credentials = match password {
            Some(p) => format!("{}:{}", username.into(), p.into()),
            None => format!("{}:", username.into()),
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        self.header("authorization", format!("Basic {}", encoded))
    }

    /// Attach a logger that fully replaces the client-wide logger for this
    /// call. Scopes never merge.
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }
}

/// The fully merged options used for one network call.
#[derive(Debug, Clone)]
pub struct EffectiveOptions {
    /// Resolved HTTP method.
    pub method: Method,
    /// Default headers overlaid by per-request headers, key-by-key.
    pub headers: HeaderMap,
    /// Per-request timeout, if any.
    pub timeout: Option<Duration>,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

impl EffectiveOptions {
    /// Merge config defaults with per-request options. Per-request values win
    /// on every key; headers merge key-by-key with per-request values
    /// replacing same-name defaults. The method defaults to `GET` when set
    /// nowhere.
    pub(crate) fn merge(config: &ClientConfig, options: &RequestOptions) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        Self {
            method: options.method.clone().unwrap_or(Method::GET),
            headers,
            timeout: options.timeout,
            body: options.body.clone(),
        }
    }
}

/// Join the optional base URL with the target and append query pairs.
pub(crate) fn build_url(
    base: Option<&str>,
    target: &str,
    query: &[(String, String)],
) -> Result<url::Url> {
    let mut url = if let Some(base) = base {
        let base = url::Url::parse(base).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        base.join(target)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?
    } else {
        url::Url::parse(target).map_err(|e| FetchError::InvalidUrl(e.to_string()))?
    };

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
