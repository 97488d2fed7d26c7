//! Buffered response wrapper.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// A fully buffered HTTP response.
///
/// The body is read from the transport exactly once, when the wrapper is
/// constructed; decoding and the lifecycle hooks then work on the buffered
/// bytes.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    status_text: String,
    headers: HeaderMap,
    body: Bytes,
    url: url::Url,
}

impl Response {
    /// Buffer a reqwest response. A transport failure while reading the body
    /// surfaces as an error instead of an empty body.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> crate::Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes().await?;

        Ok(Self {
            status,
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
            url,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
            url: url::Url::parse("http://localhost/").expect("static test url"),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase for the status code.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response URL.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Get the buffered response body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }
}
