//! The delegate engine.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use manzano_http_client::{
    BoxError, Cancel, CancelToken, RawRequest, RequestConfig, RequestInterceptor, Response,
    ResponseInterceptor,
};
use std::future::Future;
use tracing::debug;
use url::Url;

use crate::{Cancelled, ConfigError, EngineError, InterceptorManager, ReqwestConfig, codes};

/// Capabilities the adapter needs from an engine.
///
/// `request` runs the full interceptor pipeline and fails with the engine's
/// native error values ([`Cancelled`], [`EngineError`]) or whatever an
/// interceptor raised.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Issue a request through the interceptor pipeline.
    async fn request(&self, config: RequestConfig) -> Result<Response, BoxError>;

    /// Registry of outbound request interceptors.
    fn request_interceptors(&self) -> &InterceptorManager<dyn RequestInterceptor>;

    /// Registry of inbound response interceptors.
    fn response_interceptors(&self) -> &InterceptorManager<dyn ResponseInterceptor>;

    /// Create a fresh cancellation source.
    fn cancel_source(&self) -> (CancelToken, Cancel) {
        CancelToken::source()
    }
}

/// Run `dispatch` wrapped in the registered interceptors.
///
/// Request interceptors run last-registered first, response interceptors in
/// registration order. Each stage receives either the previous value or the
/// previous failure and may recover from the latter.
pub async fn run_pipeline<F, Fut>(
    request_interceptors: &InterceptorManager<dyn RequestInterceptor>,
    response_interceptors: &InterceptorManager<dyn ResponseInterceptor>,
    config: RequestConfig,
    dispatch: F,
) -> Result<Response, BoxError>
where
    F: FnOnce(RequestConfig) -> Fut,
    Fut: Future<Output = Result<Response, BoxError>>,
{
    let mut outgoing: Result<RequestConfig, BoxError> = Ok(config);
    for interceptor in request_interceptors.snapshot().into_iter().rev() {
        outgoing = match outgoing {
            Ok(config) => interceptor.on_request(config).await,
            Err(error) => interceptor.on_request_error(error).await,
        };
    }

    let mut incoming = match outgoing {
        Ok(config) => dispatch(config).await,
        Err(error) => Err(error),
    };
    for interceptor in response_interceptors.snapshot() {
        incoming = match incoming {
            Ok(response) => interceptor.on_response(response).await,
            Err(error) => interceptor.on_error(error).await,
        };
    }

    incoming
}

/// Engine backed by a shared [`reqwest::Client`].
pub struct ReqwestEngine {
    client: reqwest::Client,
    config: ReqwestConfig,
    base_url: Option<Url>,
    default_headers: HeaderMap,
    request_interceptors: InterceptorManager<dyn RequestInterceptor>,
    response_interceptors: InterceptorManager<dyn ResponseInterceptor>,
}

impl ReqwestEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: ReqwestConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url.as_deref().map(Url::parse).transpose()?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::try_from(value.as_str())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            default_headers.append(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .brotli(config.brotli);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            base_url,
            default_headers,
            request_interceptors: InterceptorManager::new(),
            response_interceptors: InterceptorManager::new(),
        })
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.config
    }

    /// Resolve the request URL against the base URL and append query parameters.
    fn resolve_url(&self, config: &RequestConfig) -> Result<Url, EngineError> {
        let parsed = match &self.base_url {
            Some(base) => base.join(&config.url),
            None => Url::parse(&config.url),
        };
        let mut url = parsed.map_err(|e| {
            EngineError::new(
                format!("Invalid URL '{}': {}", config.url, e),
                codes::INVALID_URL,
                config.clone(),
            )
        })?;

        if !config.params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &config.params {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn build_request(&self, config: &RequestConfig) -> Result<reqwest::Request, EngineError> {
        let url = self.resolve_url(config)?;

        let mut request = self
            .client
            .request(config.method.clone(), url)
            .headers(self.default_headers.clone())
            .headers(config.headers.clone());

        if let Some(body) = &config.body {
            request = request.body(body.clone());
        }
        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }

        request
            .build()
            .map_err(|e| EngineError::from_reqwest(e, config.clone(), None))
    }

    async fn send(
        &self,
        request: reqwest::Request,
    ) -> Result<(StatusCode, HeaderMap, Bytes), reqwest::Error> {
        let response = self.client.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok((status, headers, body))
    }

    /// Issue a single request, bypassing interceptors.
    pub async fn dispatch(&self, config: RequestConfig) -> Result<Response, BoxError> {
        if let Some(token) = &config.cancel_token
            && token.is_cancelled()
        {
            return Err(Box::new(Cancelled::from_token(token)));
        }

        let request = self.build_request(&config)?;
        let raw = RawRequest::new(
            request.method().clone(),
            request.url().clone(),
            request.headers().clone(),
        );

        debug!(method = %raw.method, url = %raw.url, "Sending HTTP request");

        let sent = match &config.cancel_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(url = %raw.url, "HTTP request cancelled in flight");
                        return Err(Box::new(Cancelled::from_token(token)));
                    }
                    sent = self.send(request) => sent,
                }
            }
            None => self.send(request).await,
        };

        let (status, headers, body) = match sent {
            Ok(parts) => parts,
            Err(e) => {
                debug!(error = %e, url = %raw.url, "HTTP request failed");
                return Err(Box::new(EngineError::from_reqwest(e, config, Some(raw))));
            }
        };

        self.settle(config, raw, status, headers, body)
    }

    /// Turn a fully received response into the request's outcome.
    ///
    /// A token cancelled while the body was being read still wins over the
    /// response.
    fn settle(
        &self,
        config: RequestConfig,
        raw: RawRequest,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, BoxError> {
        if let Some(token) = &config.cancel_token
            && token.is_cancelled()
        {
            debug!(url = %raw.url, "HTTP request cancelled after response arrived");
            return Err(Box::new(Cancelled::from_token(token)));
        }

        debug!(status = %status, url = %raw.url, "Received HTTP response");

        let response = Response::new(status, headers, body, config).with_request(raw);
        if !self.config.accepts_status(status) {
            return Err(Box::new(EngineError::bad_status(response)));
        }

        Ok(response)
    }
}

#[async_trait]
impl Engine for ReqwestEngine {
    async fn request(&self, config: RequestConfig) -> Result<Response, BoxError> {
        run_pipeline(
            &self.request_interceptors,
            &self.response_interceptors,
            config,
            |config| self.dispatch(config),
        )
        .await
    }

    fn request_interceptors(&self) -> &InterceptorManager<dyn RequestInterceptor> {
        &self.request_interceptors
    }

    fn response_interceptors(&self) -> &InterceptorManager<dyn ResponseInterceptor> {
        &self.response_interceptors
    }
}

impl std::fmt::Debug for ReqwestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestEngine")
            .field("config", &self.config)
            .field("request_interceptors", &self.request_interceptors)
            .field("response_interceptors", &self.response_interceptors)
            .finish()
    }
}
