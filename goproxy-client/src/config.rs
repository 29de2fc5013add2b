//! Client configuration.
//!
//! Settings can come from a TOML file, the builder, or the `GOPROXY`
//! environment variable:
//!
//! ```toml
//! goproxy = "https://goproxy.example,https://proxy.golang.org"
//! timeout_seconds = 10
//! follow_redirects = true
//! user_agent = "my-tool/1.0"
//! ```

use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public proxy used when no usable proxy is configured
pub const DEFAULT_PROXY: &str = "https://proxy.golang.org";

/// Environment variable holding the chain specification
pub const GOPROXY_ENV: &str = "GOPROXY";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings shared by every proxy in a chain
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Chain specification; overrides `GOPROXY` when set
    pub goproxy: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Whether to follow redirects
    pub follow_redirects: Option<bool>,
    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(ProxyError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects.unwrap_or(true)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        })
    }

    /// Chain specification from this config, then `GOPROXY`, then [`DEFAULT_PROXY`].
    ///
    /// An explicitly configured empty string is kept; building a chain from it
    /// yields the default proxy.
    pub fn resolve_goproxy(&self) -> String {
        resolve_goproxy_with(self.goproxy.as_deref(), std::env::var(GOPROXY_ENV).ok())
    }
}

fn resolve_goproxy_with(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| env.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_PROXY.to_string())
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn goproxy<S: Into<String>>(mut self, spec: S) -> Self {
        self.config.goproxy = Some(spec.into());
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = Some(seconds);
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.config.follow_redirects = Some(follow);
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, agent: S) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
