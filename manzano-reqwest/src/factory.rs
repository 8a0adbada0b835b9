//! Client construction.

use manzano_http_client::HttpClient;
use std::sync::Arc;

use crate::{ConfigError, ReqwestConfig, ReqwestHttpClient};

/// Build a reqwest-backed client, erased to the [`HttpClient`] contract.
///
/// `None` uses [`ReqwestConfig::default`].
pub fn create_reqwest_http_client(
    config: Option<ReqwestConfig>,
) -> Result<Arc<dyn HttpClient>, ConfigError> {
    let client = ReqwestHttpClient::new(config.unwrap_or_default())?;
    Ok(Arc::new(client))
}
