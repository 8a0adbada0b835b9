//! # Manzano HTTP Client
//!
//! The engine-independent contract that application code programs against.
//! Concrete transports (see `manzano-reqwest`) implement [`HttpClient`] and
//! translate their own request, response and error shapes into the types
//! defined here.
//!
//! ## Features
//!
//! - **Request configuration**: a plain value describing method, URL, headers,
//!   query parameters, body, timeout and an optional cancel token
//! - **Responses**: status, headers and a generically typed body
//! - **Error kinds**: [`CancelError`] for cancelled requests, [`HttpError`] for
//!   transport or protocol failures, everything else passed through untouched
//! - **Interceptors**: request and response hooks with removal handles
//! - **Cancellation**: token/cancel pairs for cooperative early termination
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use manzano_http_client::{HttpClient, HttpClientExt, RequestConfig};
//!
//! async fn ping(client: &dyn HttpClient) -> manzano_http_client::Result<()> {
//!     let (token, cancel) = client.create_cancel_token();
//!
//!     let config = RequestConfig::get("/ping").with_cancel_token(token);
//!     let response = client.exchange(config).await?;
//!     println!("Status: {}", response.status());
//!
//!     // Nothing in flight any more, so this is a no-op.
//!     cancel.cancel();
//!
//!     let typed = client.exchange_json::<serde_json::Value>(RequestConfig::get("/ping")).await?;
//!     println!("Body: {}", typed.data());
//!     Ok(())
//! }
//! ```

mod cancel;
mod client;
mod error;
mod interceptor;
mod request;
mod response;

pub use cancel::{Cancel, CancelToken, DEFAULT_CANCEL_REASON};
pub use client::{HttpClient, HttpClientExt};
pub use error::{BoxError, CancelError, HttpClientError, HttpError, Result};
pub use interceptor::{
    AuthInterceptor, LoggingInterceptor, RemoveInterceptor, RequestInterceptor,
    ResponseInterceptor,
};
pub use request::RequestConfig;
pub use response::{RawRequest, Response};

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use manzano_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cancel::{Cancel, CancelToken};
    pub use crate::client::{HttpClient, HttpClientExt};
    pub use crate::error::{BoxError, CancelError, HttpClientError, HttpError, Result};
    pub use crate::interceptor::{RemoveInterceptor, RequestInterceptor, ResponseInterceptor};
    pub use crate::request::RequestConfig;
    pub use crate::response::{RawRequest, Response};
    pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
}
