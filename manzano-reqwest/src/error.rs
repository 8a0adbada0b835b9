//! Engine-native error types.

use http::StatusCode;
use manzano_http_client::{
    CancelToken, DEFAULT_CANCEL_REASON, HttpError, RawRequest, RequestConfig, Response,
};
use thiserror::Error;

/// Error codes attached to [`EngineError`].
pub mod codes {
    /// The request or connection timed out.
    pub const TIMED_OUT: &str = "ETIMEDOUT";
    /// The request never produced a response.
    pub const NETWORK: &str = "ERR_NETWORK";
    /// The redirect limit was exceeded.
    pub const TOO_MANY_REDIRECTS: &str = "ERR_FR_TOO_MANY_REDIRECTS";
    /// The request could not be built from its configuration.
    pub const BAD_OPTION: &str = "ERR_BAD_OPTION";
    /// The request URL could not be parsed or resolved.
    pub const INVALID_URL: &str = "ERR_INVALID_URL";
    /// The server answered with a 4xx status.
    pub const BAD_REQUEST: &str = "ERR_BAD_REQUEST";
    /// The server answered with a rejected non-4xx status, or the body could not be read.
    pub const BAD_RESPONSE: &str = "ERR_BAD_RESPONSE";
}

/// The request was cancelled before it completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Cancelled {
    reason: String,
}

impl Cancelled {
    /// Create a cancellation with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Build the cancellation observed on `token`.
    pub fn from_token(token: &CancelToken) -> Self {
        Self::new(token.reason().unwrap_or(DEFAULT_CANCEL_REASON))
    }

    /// The reason given when cancelling.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Transport or protocol failure raised by [`ReqwestEngine`](crate::ReqwestEngine).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    code: String,
    config: RequestConfig,
    response: Option<Response>,
    request: Option<RawRequest>,
    #[source]
    source: Option<reqwest::Error>,
}

impl EngineError {
    /// Create an engine error.
    pub fn new(message: impl Into<String>, code: impl Into<String>, config: RequestConfig) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            config,
            response: None,
            request: None,
            source: None,
        }
    }

    /// Translate a reqwest failure.
    pub fn from_reqwest(
        error: reqwest::Error,
        config: RequestConfig,
        request: Option<RawRequest>,
    ) -> Self {
        let code = if error.is_timeout() {
            codes::TIMED_OUT
        } else if error.is_redirect() {
            codes::TOO_MANY_REDIRECTS
        } else if error.is_builder() {
            codes::BAD_OPTION
        } else if error.is_decode() || error.is_body() {
            codes::BAD_RESPONSE
        } else {
            codes::NETWORK
        };

        Self {
            message: error.to_string(),
            code: code.to_string(),
            config,
            response: None,
            request,
            source: Some(error),
        }
    }

    /// A response whose status was rejected by the status predicate.
    pub fn bad_status(response: Response) -> Self {
        let status = response.status();
        let code = if status.is_client_error() {
            codes::BAD_REQUEST
        } else {
            codes::BAD_RESPONSE
        };

        Self {
            message: format!("Request failed with status code {}", status.as_u16()),
            code: code.to_string(),
            config: response.config().clone(),
            request: response.request().cloned(),
            response: Some(response),
            source: None,
        }
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error code, one of [`codes`] for errors raised by the engine itself.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Configuration of the failed request.
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Response, if one arrived.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Status of the response, if one arrived.
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(Response::status)
    }

    /// Request as issued, if it was built.
    pub fn request(&self) -> Option<&RawRequest> {
        self.request.as_ref()
    }

    /// Convert into the contract's [`HttpError`], moving every field over.
    pub fn into_http_error(self) -> HttpError {
        HttpError::new(self.message, self.config)
            .with_response(self.response)
            .with_code(Some(self.code))
            .with_request(self.request)
            .with_source(self.source.map(|e| Box::new(e) as manzano_http_client::BoxError))
    }
}

/// Failure to construct an engine from its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// reqwest rejected the client settings.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The base URL does not parse.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A default header has an invalid name or value.
    #[error("Invalid default header: {0}")]
    InvalidHeader(String),
}
