//! [`HttpClient`] implementation over an [`Engine`].

use async_trait::async_trait;
use manzano_http_client::{
    BoxError, Cancel, CancelToken, HttpClient, HttpClientError, RemoveInterceptor, RequestConfig,
    RequestInterceptor, Response, ResponseInterceptor, Result,
};
use std::sync::Arc;

use crate::{ConfigError, Engine, ReqwestConfig, ReqwestEngine, classify};

/// HTTP client that delegates to one engine for its whole lifetime.
pub struct ReqwestHttpClient<E: Engine = ReqwestEngine> {
    delegate: E,
}

impl ReqwestHttpClient<ReqwestEngine> {
    /// Create a client backed by a new [`ReqwestEngine`].
    pub fn new(config: ReqwestConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_engine(ReqwestEngine::new(config)?))
    }
}

impl<E: Engine> ReqwestHttpClient<E> {
    /// Wrap an existing engine.
    pub fn with_engine(delegate: E) -> Self {
        Self { delegate }
    }
}

#[async_trait]
impl<E: Engine> HttpClient for ReqwestHttpClient<E> {
    async fn exchange(&self, config: RequestConfig) -> Result<Response> {
        self.delegate.request(config).await.map_err(classify)
    }

    fn add_response_interceptor(
        &self,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> RemoveInterceptor {
        let manager = self.delegate.response_interceptors().clone();
        let id = manager.register(Arc::new(ClassifyingInterceptor { inner: interceptor }));
        RemoveInterceptor::new(move || manager.eject(id))
    }

    fn add_request_interceptor(
        &self,
        interceptor: Arc<dyn RequestInterceptor>,
    ) -> RemoveInterceptor {
        let manager = self.delegate.request_interceptors().clone();
        let id = manager.register(interceptor);
        RemoveInterceptor::new(move || manager.eject(id))
    }

    fn create_cancel_token(&self) -> (CancelToken, Cancel) {
        self.delegate.cancel_source()
    }
}

impl<E: Engine + std::fmt::Debug> std::fmt::Debug for ReqwestHttpClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpClient")
            .field("delegate", &self.delegate)
            .finish()
    }
}

/// Response interceptor whose error handler failures are classified before
/// they continue down the chain. Unclassified failures continue as they are.
struct ClassifyingInterceptor {
    inner: Arc<dyn ResponseInterceptor>,
}

#[async_trait]
impl ResponseInterceptor for ClassifyingInterceptor {
    async fn on_response(&self, response: Response) -> std::result::Result<Response, BoxError> {
        self.inner.on_response(response).await
    }

    async fn on_error(&self, error: BoxError) -> std::result::Result<Response, BoxError> {
        self.inner.on_error(error).await.map_err(|error| match classify(error) {
            HttpClientError::Other(original) => original,
            classified => Box::new(classified) as BoxError,
        })
    }
}
