//! HTTP client error kinds.

use http::StatusCode;
use thiserror::Error;

use crate::{RawRequest, RequestConfig, Response};

/// Type-erased error as produced by engines and interceptors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// Errors surfaced to callers of [`HttpClient`](crate::HttpClient).
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request was cancelled through its cancel token.
    #[error(transparent)]
    Cancel(#[from] CancelError),

    /// The engine failed with a transport or protocol error.
    #[error(transparent)]
    Http(Box<HttpError>),

    /// Any other failure, passed through exactly as it was raised.
    #[error(transparent)]
    Other(BoxError),
}

impl HttpClientError {
    /// Check if the request was cancelled.
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel(_))
    }

    /// Check if this is a transport or protocol error.
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Get the engine error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.code.as_deref(),
            _ => None,
        }
    }

    /// Get the response received before failing, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Http(e) => e.response.as_ref(),
            _ => None,
        }
    }

    /// Get the HTTP status code of the response received before failing.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(Response::status)
    }

    /// Get the underlying [`HttpError`].
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Get the unclassified error, if this is one.
    pub fn as_other(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Unwrap into the boxed error this kind holds.
    pub fn into_inner(self) -> BoxError {
        match self {
            Self::Cancel(e) => Box::new(e),
            Self::Http(e) => e,
            Self::Other(e) => e,
        }
    }
}

impl From<HttpError> for HttpClientError {
    fn from(error: HttpError) -> Self {
        Self::Http(Box::new(error))
    }
}

/// The request was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CancelError {
    message: String,
}

impl CancelError {
    /// Create a cancel error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Transport or protocol failure reported by the engine.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpError {
    /// Human readable description.
    pub message: String,
    /// Configuration of the failed request.
    pub config: RequestConfig,
    /// Response, if one arrived before the failure.
    pub response: Option<Response>,
    /// Engine error code, e.g. `ERR_NETWORK`.
    pub code: Option<String>,
    /// The request as issued by the engine, if it got that far.
    pub request: Option<RawRequest>,
    /// Engine-native cause.
    #[source]
    pub source: Option<crate::BoxError>,
}

impl HttpError {
    /// Create an HTTP error for the given request configuration.
    pub fn new(message: impl Into<String>, config: RequestConfig) -> Self {
        Self {
            message: message.into(),
            config,
            response: None,
            code: None,
            request: None,
            source: None,
        }
    }

    /// Attach the response received before failing.
    pub fn with_response(mut self, response: Option<Response>) -> Self {
        self.response = response;
        self
    }

    /// Attach an error code.
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Attach the issued request.
    pub fn with_request(mut self, request: Option<RawRequest>) -> Self {
        self.request = request;
        self
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: Option<crate::BoxError>) -> Self {
        self.source = source;
        self
    }
}
