//! # Fetchkit Client
//!
//! A thin convenience wrapper around [`reqwest`]: method shortcuts for the
//! seven common HTTP verbs, layered configuration merging, pluggable
//! lifecycle hooks, and content-type driven response decoding. The
//! `analytics` feature adds in-process request counters.
//!
//! The wrapper is deliberately thin. There are no retries, no circuit
//! breaker, and no request coalescing; a caller wanting resilience wraps
//! calls externally.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use fetchkit_client::{Client, ClientConfig, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::default());
//!
//!     let body = client
//!         .get("https://api.example.com/users", RequestOptions::new())
//!         .await?;
//!
//!     println!("decoded: {body:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Lifecycle hooks
//!
//! ```rust,no_run
//! use fetchkit_client::{Client, ClientConfig, RequestOptions, TracingLogger};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::default());
//!     client.set_logger(TracingLogger::new().with_headers());
//!
//!     // Hooks fire in order: on_request, then on_response or on_error.
//!     let user: serde_json::Value = client
//!         .get("https://api.example.com/users/7", RequestOptions::new())
//!         .await?
//!         .into_json()?;
//!
//!     println!("{user}");
//!     Ok(())
//! }
//! ```
//!
//! ## Process-wide surface
//!
//! The [`global`] module mirrors the client API as free functions backed by a
//! shared, reconfigurable default client.

mod client;
mod config;
mod decode;
mod error;
pub mod global;
mod logger;
mod request;
mod response;

pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigPatch};
pub use decode::{decode, Blob, DecodedBody, UnsupportedBodyPolicy};
pub use error::{FetchError, Result};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use request::{EffectiveOptions, RequestOptions};
pub use response::Response;

// Re-export common types
pub use bytes::Bytes;
pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode};

/// Prelude for common imports.
///
/// ```
/// use fetchkit_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::config::{ClientConfig, ClientConfigBuilder, ConfigPatch};
    pub use crate::decode::{Blob, DecodedBody, UnsupportedBodyPolicy};
    pub use crate::error::{FetchError, Result};
    pub use crate::logger::{Logger, NoopLogger, TracingLogger};
    pub use crate::request::{EffectiveOptions, RequestOptions};
    pub use crate::response::Response;
    pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
}
