//! Client error types.

use thiserror::Error;

/// Result type for fetchkit operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors produced by the request pipeline.
///
/// The message text of [`FetchError::Status`] and
/// [`FetchError::UnsupportedContentType`] is part of the public contract;
/// dependents match on it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A response arrived carrying a non-success status.
    #[error("fetchkit: Request failed with status {status}: {status_text}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Reason phrase reported for the status.
        status_text: String,
    },

    /// The response content type matched no decode rule.
    #[error("fetchkit: Unsupported response content type: {content_type}")]
    UnsupportedContentType {
        /// Declared content type, empty when the header was absent.
        content_type: String,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request building error.
    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// JSON or text body decoding error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Transport-level failure: connectivity, DNS, TLS, timeout.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl FetchError {
    /// Get the HTTP status code if this is a declared failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check whether the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check whether this is a declared HTTP failure.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Check whether this is a decode failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::UnsupportedContentType { .. } | Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_format() {
        let err = FetchError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fetchkit: Request failed with status 404: Not Found"
        );
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_status());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_unsupported_content_type_message_format() {
        let err = FetchError::UnsupportedContentType {
            content_type: "application/x-msgpack".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fetchkit: Unsupported response content type: application/x-msgpack"
        );
        assert!(err.is_decode());
        assert_eq!(err.status_code(), None);
    }
}
