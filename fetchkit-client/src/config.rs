//! Client configuration.

use crate::decode::UnsupportedBodyPolicy;
use std::time::Duration;

/// Default request options shared by every call on a client.
///
/// A config is an immutable snapshot: updates go through
/// [`ClientConfig::apply`], which produces a new value instead of mutating in
/// place.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL joined with per-request paths.
    pub base_url: Option<String>,
    /// Default request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Connection pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Default headers applied to all requests, overridable per request.
    pub default_headers: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
    /// Enable gzip decompression.
    pub gzip: bool,
    /// Enable brotli decompression.
    pub brotli: bool,
    /// Follow redirects.
    pub follow_redirects: bool,
    /// Maximum redirects to follow.
    pub max_redirects: usize,
    /// What to do with response bodies whose content type matches no decode
    /// rule.
    pub unsupported_body: UnsupportedBodyPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
            default_headers: Vec::new(),
            user_agent: format!("fetchkit/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
            brotli: true,
            follow_redirects: true,
            max_redirects: 10,
            unsupported_body: UnsupportedBodyPolicy::Error,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Shallow-merge `patch` onto this config, producing a new snapshot.
    ///
    /// Every key the patch carries replaces the current value; headers merge
    /// key-by-key (case-insensitive names) with the patch winning on
    /// conflicts.
    pub fn apply(&self, patch: ConfigPatch) -> ClientConfig {
        let mut next = self.clone();

        if let Some(v) = patch.base_url {
            next.base_url = Some(v);
        }
        if let Some(v) = patch.timeout {
            next.timeout = v;
        }
        if let Some(v) = patch.connect_timeout {
            next.connect_timeout = v;
        }
        if let Some(v) = patch.user_agent {
            next.user_agent = v;
        }
        if let Some(v) = patch.gzip {
            next.gzip = v;
        }
        if let Some(v) = patch.brotli {
            next.brotli = v;
        }
        if let Some(v) = patch.follow_redirects {
            next.follow_redirects = v;
        }
        if let Some(v) = patch.max_redirects {
            next.max_redirects = v;
        }
        if let Some(v) = patch.unsupported_body {
            next.unsupported_body = v;
        }

        for (name, value) in patch.default_headers {
            match next
                .default_headers
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(&name))
            {
                Some(entry) => entry.1 = value,
                None => next.default_headers.push((name, value)),
            }
        }

        next
    }
}

/// Partial configuration update, shallow-merged by [`ClientConfig::apply`].
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    /// New base URL.
    pub base_url: Option<String>,
    /// New default request timeout.
    pub timeout: Option<Duration>,
    /// New connection timeout.
    pub connect_timeout: Option<Duration>,
    /// New user agent string.
    pub user_agent: Option<String>,
    /// Toggle gzip decompression.
    pub gzip: Option<bool>,
    /// Toggle brotli decompression.
    pub brotli: Option<bool>,
    /// Toggle redirect following.
    pub follow_redirects: Option<bool>,
    /// New redirect limit.
    pub max_redirects: Option<usize>,
    /// New unsupported-content-type policy.
    pub unsupported_body: Option<UnsupportedBodyPolicy>,
    /// Headers merged key-by-key into the current defaults.
    pub default_headers: Vec<(String, String)>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a default header to merge into the current set.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the unsupported-content-type policy.
    pub fn unsupported_body(mut self, policy: UnsupportedBodyPolicy) -> Self {
        self.unsupported_body = Some(policy);
        self
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the connection pool idle timeout.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Add a default header for all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable gzip decompression.
    pub fn gzip(mut self, enable: bool) -> Self {
        self.config.gzip = enable;
        self
    }

    /// Enable or disable brotli decompression.
    pub fn brotli(mut self, enable: bool) -> Self {
        self.config.brotli = enable;
        self
    }

    /// Enable or disable following redirects.
    pub fn follow_redirects(mut self, enable: bool) -> Self {
        self.config.follow_redirects = enable;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set the unsupported-content-type policy.
    pub fn unsupported_body(mut self, policy: UnsupportedBodyPolicy) -> Self {
        self.config.unsupported_body = policy;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.gzip);
        assert!(config.follow_redirects);
        assert_eq!(config.unsupported_body, UnsupportedBodyPolicy::Error);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .timeout(Duration::from_secs(60))
            .default_header("x-api-key", "secret")
            .unsupported_body(UnsupportedBodyPolicy::Empty)
            .build();

        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(
            config.default_headers,
            vec![("x-api-key".to_string(), "secret".to_string())]
        );
        assert_eq!(config.unsupported_body, UnsupportedBodyPolicy::Empty);
    }

    #[test]
    fn test_apply_overlays_scalars() {
        let config = ClientConfig::default();
        let next = config.apply(
            ConfigPatch::new()
                .base_url("https://api.example.com")
                .timeout(Duration::from_secs(5)),
        );

        assert_eq!(next.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(next.timeout, Duration::from_secs(5));
        // Untouched keys keep their previous values.
        assert_eq!(next.connect_timeout, config.connect_timeout);
        assert_eq!(next.user_agent, config.user_agent);
    }

    #[test]
    fn test_apply_merges_headers_key_by_key() {
        let config = ClientConfig::builder()
            .default_header("x-tag", "old")
            .default_header("x-keep", "kept")
            .build();

        let next = config.apply(
            ConfigPatch::new()
                .header("X-Tag", "new")
                .header("x-extra", "added"),
        );

        assert_eq!(next.default_headers.len(), 3);
        assert!(
            next.default_headers
                .contains(&("x-tag".to_string(), "new".to_string()))
        );
        assert!(
            next.default_headers
                .contains(&("x-keep".to_string(), "kept".to_string()))
        );
        assert!(
            next.default_headers
                .contains(&("x-extra".to_string(), "added".to_string()))
        );
    }

    #[test]
    fn test_apply_does_not_mutate_original() {
        let config = ClientConfig::default();
        let _ = config.apply(ConfigPatch::new().base_url("https://elsewhere.test"));
        assert!(config.base_url.is_none());
    }
}
