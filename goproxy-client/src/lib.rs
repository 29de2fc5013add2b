//! goproxy-client - query Go module proxies with GOPROXY-style fallback
//!
//! A chain specification such as `https://corp.example,https://proxy.golang.org`
//! is turned into a [`ProxyChain`]. Every query walks the chain in order and
//! returns the first success. A `,` in front of a proxy means it is only
//! tried after a 404/410 failure; a `|` means it is tried after any failure.
//! `direct`, `off` and empty entries are skipped.
//!
//! ```no_run
//! use goproxy_client::{ClientConfig, ProxyChain};
//!
//! # async fn run() -> goproxy_client::Result<()> {
//! let config = ClientConfig::default();
//! let chain = ProxyChain::new("https://proxy.golang.org|https://goproxy.io", &config)?;
//! let versions = chain.list("golang.org/x/mod").await?;
//! println!("{}", versions.join("\n"));
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Request construction and version handling
pub mod url_builder;
pub mod version;

// Main functionality modules
pub mod analysis;
pub mod chain;
pub mod http;

pub mod testing;

// Re-export main types for convenience
pub use analysis::{is_not_found, is_not_found_error, StatusCoded};
pub use chain::{parse_chain, ChainToken, FallbackPolicy, ProxyChain};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_PROXY, GOPROXY_ENV};
pub use error::{ProxyError, Result, ResultExt};
pub use http::HttpProxy;
pub use traits::ModuleProxy;
pub use types::{ContentStream, QueryKind, VersionInfo};

// Cancellation handle accepted by ProxyChain::with_cancellation
pub use tokio_util::sync::CancellationToken;
