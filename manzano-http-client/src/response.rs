//! HTTP response value.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::RequestConfig;

/// The request as the engine actually issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved URL, including query parameters.
    pub url: Url,
    /// Headers sent, including engine defaults.
    pub headers: HeaderMap,
}

impl RawRequest {
    /// Create a raw request snapshot.
    pub fn new(method: Method, url: Url, headers: HeaderMap) -> Self {
        Self {
            method,
            url,
            headers,
        }
    }
}

/// HTTP response with a generically typed body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T = Bytes> {
    status: StatusCode,
    headers: HeaderMap,
    data: T,
    config: RequestConfig,
    request: Option<RawRequest>,
}

impl<T> Response<T> {
    /// Create a response.
    pub fn new(status: StatusCode, headers: HeaderMap, data: T, config: RequestConfig) -> Self {
        Self {
            status,
            headers,
            data,
            config,
            request: None,
        }
    }

    /// Attach the request that produced this response.
    pub fn with_request(mut self, request: RawRequest) -> Self {
        self.request = Some(request);
        self
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the canonical reason phrase for the status code.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the response headers mutably.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the content type if available.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the content length if available.
    pub fn content_length(&self) -> Option<u64> {
        self.header("content-length").and_then(|v| v.parse().ok())
    }

    /// Get the body.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Get the body mutably.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Consume the response and return the body.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Get the configuration of the request that produced this response.
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Get the request as issued by the engine.
    pub fn request(&self) -> Option<&RawRequest> {
        self.request.as_ref()
    }

    /// Transform the body, keeping everything else.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
            config: self.config,
            request: self.request,
        }
    }

    /// Transform the body with a fallible function.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Response<U>, E> {
        Ok(Response {
            status: self.status,
            headers: self.headers,
            data: f(self.data)?,
            config: self.config,
            request: self.request,
        })
    }
}

impl Response<Bytes> {
    /// Get the body as text.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.data.to_vec())
    }

    /// Parse the body as JSON.
    pub fn json<U: DeserializeOwned>(&self) -> Result<U, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }
}
