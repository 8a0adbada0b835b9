//! # Manzano reqwest adapter
//!
//! Implements the [`HttpClient`](manzano_http_client::HttpClient) contract on
//! top of [`reqwest`].
//!
//! ## Features
//!
//! - **Engine**: [`ReqwestEngine`] owns a pooled `reqwest::Client`, the
//!   interceptor registries and the cancellation source
//! - **Adapter**: [`ReqwestHttpClient`] translates engine failures into the
//!   contract's error kinds through a single [`classify`] function
//! - **Factory**: [`create_reqwest_http_client`] returns the adapter as
//!   `Arc<dyn HttpClient>`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use manzano_http_client::{HttpClient, RequestConfig};
//! use manzano_reqwest::{ReqwestConfig, create_reqwest_http_client};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReqwestConfig::builder()
//!         .base_url("https://api.example.com/")
//!         .timeout(Duration::from_secs(30))
//!         .build();
//!     let client = create_reqwest_http_client(Some(config))?;
//!
//!     let (token, cancel) = client.create_cancel_token();
//!     let request = RequestConfig::get("users").with_cancel_token(token);
//!
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_secs(5)).await;
//!         cancel.cancel();
//!     });
//!
//!     match client.exchange(request).await {
//!         Ok(response) => println!("Status: {}", response.status()),
//!         Err(e) if e.is_cancel() => println!("Gave up waiting"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

mod adapter;
mod classify;
mod config;
mod engine;
mod error;
mod factory;
mod manager;

pub use adapter::ReqwestHttpClient;
pub use classify::{CANCEL_MESSAGE, classify};
pub use config::{ReqwestConfig, ReqwestConfigBuilder, ValidateStatus};
pub use engine::{Engine, ReqwestEngine, run_pipeline};
pub use error::{Cancelled, ConfigError, EngineError, codes};
pub use factory::create_reqwest_http_client;
pub use manager::InterceptorManager;
