//! Request configuration.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;

use crate::CancelToken;

/// Description of a single request, handed to [`HttpClient::exchange`].
///
/// The URL may be absolute or relative to the engine's base URL. Query
/// parameters are appended in insertion order.
///
/// [`HttpClient::exchange`]: crate::HttpClient::exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    /// HTTP method.
    pub method: Method,
    /// Target URL.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Bytes>,
    /// Per-request timeout, enforced by the engine.
    pub timeout: Option<Duration>,
    /// Token that can cancel this request.
    pub cancel_token: Option<CancelToken>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

impl RequestConfig {
    /// Create a request configuration.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            params: Vec::new(),
            body: None,
            timeout: None,
            cancel_token: None,
        }
    }

    /// Create a GET request configuration.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request configuration.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Create a PUT request configuration.
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Create a PATCH request configuration.
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Create a DELETE request configuration.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Create a HEAD request configuration.
    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::HEAD, url)
    }

    /// Add a header. Malformed names or values are skipped.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                tracing::warn!(header = %name, "Skipping malformed request header");
            }
        }
        self
    }

    /// Add multiple headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add multiple query parameters.
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.params.push((k.into(), v.into()));
        }
        self
    }

    /// Set the body as raw bytes.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body as text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = Some(Bytes::from(text.into()));
        self
    }

    /// Set the body as JSON.
    pub fn json<T: Serialize>(mut self, json: &T) -> Self {
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

    /// Set the body as form data.
    pub fn form<T: Serialize>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                self.body = Some(Bytes::from(encoded));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode form data");
            }
        }
        self
    }

    /// Set a timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set bearer authentication.
    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
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
        self.header("Authorization", format!("Basic {}", encoded))
    }

    /// Attach a cancel token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel_token = Some(token);
        self
    }
}
