//! Engine configuration.

use http::StatusCode;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Predicate deciding which response statuses count as success.
pub type ValidateStatus = Arc<dyn Fn(StatusCode) -> bool + Send + Sync>;

/// Configuration for [`ReqwestEngine`](crate::ReqwestEngine).
#[derive(Clone)]
pub struct ReqwestConfig {
    /// Base URL that relative request URLs are joined onto.
    pub base_url: Option<String>,
    /// Default request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// How long idle pooled connections are kept.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Default headers for all requests.
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
    /// Status predicate. `None` accepts every status.
    pub validate_status: Option<ValidateStatus>,
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
            default_headers: Vec::new(),
            user_agent: format!("manzano-reqwest/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
            brotli: true,
            follow_redirects: true,
            max_redirects: 10,
            validate_status: Some(Arc::new(|status: StatusCode| status.is_success())),
        }
    }
}

impl fmt::Debug for ReqwestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("default_headers", &self.default_headers)
            .field("user_agent", &self.user_agent)
            .field("gzip", &self.gzip)
            .field("brotli", &self.brotli)
            .field("follow_redirects", &self.follow_redirects)
            .field("max_redirects", &self.max_redirects)
            .field("validate_status", &self.validate_status.is_some())
            .finish()
    }
}

impl ReqwestConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReqwestConfigBuilder {
        ReqwestConfigBuilder::default()
    }

    /// Whether `status` passes the configured status predicate.
    pub fn accepts_status(&self, status: StatusCode) -> bool {
        self.validate_status
            .as_ref()
            .is_none_or(|validate| validate(status))
    }
}

/// Builder for [`ReqwestConfig`].
#[derive(Debug, Default)]
pub struct ReqwestConfigBuilder {
    config: ReqwestConfig,
}

impl ReqwestConfigBuilder {
    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
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

    /// Set the status predicate.
    pub fn validate_status(
        mut self,
        validate: impl Fn(StatusCode) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.config.validate_status = Some(Arc::new(validate));
        self
    }

    /// Treat every status as success.
    pub fn accept_any_status(mut self) -> Self {
        self.config.validate_status = None;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ReqwestConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReqwestConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("manzano-reqwest/"));
    }

    #[test]
    fn test_default_status_predicate() {
        let config = ReqwestConfig::default();
        assert!(config.accepts_status(StatusCode::OK));
        assert!(config.accepts_status(StatusCode::NO_CONTENT));
        assert!(!config.accepts_status(StatusCode::MOVED_PERMANENTLY));
        assert!(!config.accepts_status(StatusCode::NOT_FOUND));
        assert!(!config.accepts_status(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_builder() {
        let config = ReqwestConfig::builder()
            .base_url("https://api.example.com/v1/")
            .timeout(Duration::from_secs(60))
            .default_header("x-tenant", "acme")
            .follow_redirects(false)
            .validate_status(|status| status.as_u16() < 500)
            .build();

        assert_eq!(
            config.base_url.as_deref(),
            Some("https://api.example.com/v1/")
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(
            config.default_headers,
            vec![("x-tenant".to_string(), "acme".to_string())]
        );
        assert!(!config.follow_redirects);
        assert!(config.accepts_status(StatusCode::NOT_FOUND));
        assert!(!config.accepts_status(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_accept_any_status() {
        let config = ReqwestConfig::builder().accept_any_status().build();
        assert!(config.accepts_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(format!("{:?}", config).contains("validate_status: false"));
    }
}
