// Manzano - an engine-independent async HTTP client for Rust
//
// Application code programs against the contract in `manzano-http-client`;
// the `reqwest` feature adds an adapter that fulfils it with reqwest.

// Re-export the contract
pub use manzano_http_client::*;

// Re-export the reqwest adapter
#[cfg(feature = "reqwest")]
pub use manzano_reqwest;

#[cfg(feature = "reqwest")]
pub use manzano_reqwest::{
    ConfigError, ReqwestConfig, ReqwestConfigBuilder, ReqwestEngine, ReqwestHttpClient,
    create_reqwest_http_client,
};

// Prelude for common imports
pub mod prelude {
    pub use manzano_http_client::prelude::*;

    #[cfg(feature = "reqwest")]
    pub use manzano_reqwest::{ReqwestConfig, create_reqwest_http_client};
}
