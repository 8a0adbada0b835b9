//! The generic client contract.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::{
    Cancel, CancelToken, HttpClientError, RemoveInterceptor, RequestConfig, RequestInterceptor,
    Response, ResponseInterceptor, Result,
};

/// Engine-independent HTTP client.
///
/// Implementations translate their engine's errors so that callers only ever
/// observe [`HttpClientError`] variants.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a request and wait for its response.
    async fn exchange(&self, config: RequestConfig) -> Result<Response>;

    /// Register a response interceptor.
    fn add_response_interceptor(&self, interceptor: Arc<dyn ResponseInterceptor>)
    -> RemoveInterceptor;

    /// Register a request interceptor.
    fn add_request_interceptor(&self, interceptor: Arc<dyn RequestInterceptor>)
    -> RemoveInterceptor;

    /// Create a fresh token/cancel pair.
    fn create_cancel_token(&self) -> (CancelToken, Cancel);
}

/// Convenience methods available on every [`HttpClient`].
#[async_trait]
pub trait HttpClientExt: HttpClient {
    /// Issue a request and decode the JSON body.
    ///
    /// Decoding failures surface as [`HttpClientError::Other`] wrapping the
    /// `serde_json::Error`.
    async fn exchange_json<T>(&self, config: RequestConfig) -> Result<Response<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.exchange(config)
            .await?
            .try_map(|body| serde_json::from_slice(&body))
            .map_err(|e| HttpClientError::Other(Box::new(e)))
    }

    /// Issue a GET request.
    async fn get(&self, url: &str) -> Result<Response> {
        self.exchange(RequestConfig::get(url)).await
    }

    /// Issue a DELETE request.
    async fn delete(&self, url: &str) -> Result<Response> {
        self.exchange(RequestConfig::delete(url)).await
    }
}

impl<C: HttpClient + ?Sized> HttpClientExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, Method, StatusCode};
    use serde::Deserialize;

    /// Echoes the request back as a JSON body.
    struct Echo;

    #[async_trait]
    impl HttpClient for Echo {
        async fn exchange(&self, config: RequestConfig) -> Result<Response> {
            let body = serde_json::json!({
                "method": config.method.as_str(),
                "url": config.url,
            });
            Ok(Response::new(
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::from(body.to_string()),
                config,
            ))
        }

        fn add_response_interceptor(
            &self,
            _interceptor: Arc<dyn ResponseInterceptor>,
        ) -> RemoveInterceptor {
            RemoveInterceptor::new(|| {})
        }

        fn add_request_interceptor(
            &self,
            _interceptor: Arc<dyn RequestInterceptor>,
        ) -> RemoveInterceptor {
            RemoveInterceptor::new(|| {})
        }

        fn create_cancel_token(&self) -> (CancelToken, Cancel) {
            CancelToken::source()
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echoed {
        method: String,
        url: String,
    }

    #[tokio::test]
    async fn test_exchange_json_decodes_body() {
        let client: Arc<dyn HttpClient> = Arc::new(Echo);
        let response = client
            .exchange_json::<Echoed>(RequestConfig::get("/users"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.data(),
            &Echoed {
                method: "GET".to_string(),
                url: "/users".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_exchange_json_decode_failure_is_other() {
        let err = Echo
            .exchange_json::<Vec<u32>>(RequestConfig::get("/users"))
            .await
            .unwrap_err();

        let inner = err.as_other().unwrap();
        assert!(inner.downcast_ref::<serde_json::Error>().is_some());
    }

    #[tokio::test]
    async fn test_shorthands() {
        let response = Echo.delete("/users/1").await.unwrap();
        assert_eq!(response.config().method, Method::DELETE);

        let response = Echo.get("/users").await.unwrap();
        assert_eq!(response.config().method, Method::GET);
    }
}
