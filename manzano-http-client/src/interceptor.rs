//! Request and response interceptors.

use async_trait::async_trait;
use http::{HeaderName, HeaderValue};
use std::fmt;

use crate::{BoxError, RequestConfig, Response};

/// Hook run on outbound requests.
///
/// Both methods default to passing their input through, so implementors only
/// override the side they care about.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Inspect or rewrite the request configuration.
    async fn on_request(&self, config: RequestConfig) -> Result<RequestConfig, BoxError> {
        Ok(config)
    }

    /// Handle a failure raised by an earlier request interceptor.
    ///
    /// Returning `Ok` recovers and lets the request proceed.
    async fn on_request_error(&self, error: BoxError) -> Result<RequestConfig, BoxError> {
        Err(error)
    }
}

/// Hook run on inbound responses and failures.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Inspect or rewrite a response.
    async fn on_response(&self, response: Response) -> Result<Response, BoxError> {
        Ok(response)
    }

    /// Handle a failed request or a failure raised by an earlier interceptor.
    ///
    /// Returning `Ok` recovers with a substitute response.
    async fn on_error(&self, error: BoxError) -> Result<Response, BoxError> {
        Err(error)
    }
}

/// Handle that unregisters a previously added interceptor.
///
/// Removal consumes the handle. Dropping it without calling [`remove`]
/// leaves the interceptor registered.
///
/// [`remove`]: RemoveInterceptor::remove
pub struct RemoveInterceptor {
    remove: Box<dyn FnOnce() + Send + Sync>,
}

impl RemoveInterceptor {
    /// Wrap the function that performs the removal.
    pub fn new(remove: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            remove: Box::new(remove),
        }
    }

    /// Unregister the interceptor.
    pub fn remove(self) {
        (self.remove)()
    }
}

impl fmt::Debug for RemoveInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveInterceptor").finish_non_exhaustive()
    }
}

/// Logging interceptor that logs requests and responses.
pub struct LoggingInterceptor {
    log_headers: bool,
}

impl LoggingInterceptor {
    /// Create a new logging interceptor.
    pub fn new() -> Self {
        Self { log_headers: false }
    }

    /// Enable logging of headers.
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestInterceptor for LoggingInterceptor {
    async fn on_request(&self, config: RequestConfig) -> Result<RequestConfig, BoxError> {
        tracing::debug!(
            method = %config.method,
            url = %config.url,
            "Sending HTTP request"
        );

        if self.log_headers {
            for (name, value) in &config.headers {
                tracing::trace!(
                    header = %name,
                    value = ?value,
                    "Request header"
                );
            }
        }

        Ok(config)
    }
}

#[async_trait]
impl ResponseInterceptor for LoggingInterceptor {
    async fn on_response(&self, response: Response) -> Result<Response, BoxError> {
        tracing::debug!(
            status = %response.status(),
            url = %response.config().url,
            "Received HTTP response"
        );

        if self.log_headers {
            for (name, value) in response.headers() {
                tracing::trace!(
                    header = %name,
                    value = ?value,
                    "Response header"
                );
            }
        }

        Ok(response)
    }

    async fn on_error(&self, error: BoxError) -> Result<Response, BoxError> {
        tracing::debug!(error = %error, "HTTP request failed");
        Err(error)
    }
}

/// Authentication interceptor that adds auth headers.
pub struct AuthInterceptor {
    auth_type: AuthType,
}

enum AuthType {
    Bearer(String),
    Basic { username: String, password: String },
    ApiKey { header: String, key: String },
}

impl AuthInterceptor {
    /// Create a bearer token interceptor.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Bearer(token.into()),
        }
    }

    /// Create a basic auth interceptor.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Basic {
                username: username.into(),
                password: password.into(),
            },
        }
    }

    /// Create an API key interceptor.
    pub fn api_key(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::ApiKey {
                header: header.into(),
                key: key.into(),
            },
        }
    }
}

#[async_trait]
impl RequestInterceptor for AuthInterceptor {
    async fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, BoxError> {
        let (name, mut value) = match &self.auth_type {
            AuthType::Bearer(token) => (
                http::header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            ),
            AuthType::Basic { username, password } => {
                use base64::Engine;
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                (
                    http::header::AUTHORIZATION,
                    HeaderValue::from_str(&format!("Basic {}", credentials))?,
                )
            }
            AuthType::ApiKey { header, key } => (
                HeaderName::from_bytes(header.as_bytes())?,
                HeaderValue::from_str(key)?,
            ),
        };

        value.set_sensitive(true);
        config.headers.insert(name, value);
        Ok(config)
    }
}
