//! Content-type driven response decoding.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{FetchError, Response, Result};

/// Policy for response bodies whose content type matches no decode rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedBodyPolicy {
    /// Fail with [`FetchError::UnsupportedContentType`].
    #[default]
    Error,
    /// Return [`DecodedBody::Empty`].
    Empty,
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// Parsed `application/json` body.
    Json(Value),
    /// `text/*` body.
    Text(String),
    /// Raw `application/octet-stream` body.
    Bytes(Bytes),
    /// Opaque `application/blob` body.
    Blob(Blob),
    /// Zero-length body, or an unmatched content type under the lenient
    /// policy.
    Empty,
}

/// Opaque binary body carrying its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Content type as declared by the response.
    pub content_type: String,
    /// Raw body bytes.
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy)]
enum BodyKind {
    Json,
    Text,
    Bytes,
    Blob,
}

fn is_json(content_type: &str) -> bool {
    content_type.contains("application/json")
}

fn is_text(content_type: &str) -> bool {
    content_type.starts_with("text/")
}

fn is_octet_stream(content_type: &str) -> bool {
    content_type.contains("application/octet-stream")
}

fn is_blob(content_type: &str) -> bool {
    content_type.contains("application/blob")
}

/// Evaluated in order; the first matching predicate selects the strategy.
const DECODE_RULES: &[(fn(&str) -> bool, BodyKind)] = &[
    (is_json, BodyKind::Json),
    (is_text, BodyKind::Text),
    (is_octet_stream, BodyKind::Bytes),
    (is_blob, BodyKind::Blob),
];

/// Decode a buffered response according to its declared content type.
///
/// Zero-length bodies decode to [`DecodedBody::Empty`] before the rule table
/// runs, so HEAD and 204 responses succeed under either policy.
pub fn decode(response: &Response, policy: UnsupportedBodyPolicy) -> Result<DecodedBody> {
    if response.bytes().is_empty() {
        return Ok(DecodedBody::Empty);
    }

    let content_type = response.content_type().unwrap_or("");
    for (matches, kind) in DECODE_RULES {
        if matches(content_type) {
            return decode_as(*kind, content_type, response.bytes());
        }
    }

    match policy {
        UnsupportedBodyPolicy::Error => Err(FetchError::UnsupportedContentType {
            content_type: content_type.to_string(),
        }),
        UnsupportedBodyPolicy::Empty => Ok(DecodedBody::Empty),
    }
}

fn decode_as(kind: BodyKind, content_type: &str, body: &Bytes) -> Result<DecodedBody> {
    match kind {
        BodyKind::Json => serde_json::from_slice(body)
            .map(DecodedBody::Json)
            .map_err(|e| FetchError::Json(e.to_string())),
        BodyKind::Text => String::from_utf8(body.to_vec())
            .map(DecodedBody::Text)
            .map_err(|e| FetchError::Json(e.to_string())),
        BodyKind::Bytes => Ok(DecodedBody::Bytes(body.clone())),
        BodyKind::Blob => Ok(DecodedBody::Blob(Blob {
            content_type: content_type.to_string(),
            data: body.clone(),
        })),
    }
}

impl DecodedBody {
    /// Deserialize the JSON variant into a typed value.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Self::Json(value) => {
                serde_json::from_value(value).map_err(|e| FetchError::Json(e.to_string()))
            }
            other => Err(FetchError::Json(format!(
                "expected a JSON body, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Borrow the JSON value, if this is the JSON variant.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the text, if this is the text variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the raw bytes, if this is the bytes variant.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// True for the empty variant.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Blob(_) => "blob",
            Self::Empty => "empty",
        }
    }
}
