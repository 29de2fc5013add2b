use crate::config::ClientConfig;
use crate::error::{ProxyError, Result};
use crate::http::ResponseConverter;
use crate::traits::ModuleProxy;
use crate::types::{ContentStream, VersionInfo};
use crate::url_builder::UrlBuilder;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::trace;

/// Build the HTTP client shared by every proxy of a chain
pub fn build_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds()))
        .redirect(if config.follow_redirects() {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| ProxyError::transport("<client builder>", e))
}

/// Client for a single Go module proxy reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpProxy {
    base_url: String,
    client: Client,
    response_converter: ResponseConverter,
}

impl HttpProxy {
    /// Create a proxy client; trailing slashes on `base_url` are dropped
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            response_converter: ResponseConverter::new(),
        }
    }

    fn urls(&self) -> UrlBuilder<'_> {
        UrlBuilder::new(&self.base_url)
    }

    async fn get(&self, url: &str) -> Result<Response> {
        trace!(url, "GET");
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::transport(url, e))
    }

    async fn get_content(&self, path: &str, version: &str, suffix: &str) -> Result<ContentStream> {
        let url = self.urls().version_file(path, version, suffix)?;
        let response = self.get(&url).await?;
        self.response_converter.convert_content(&url, response)
    }
}

impl ModuleProxy for HttpProxy {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn info(&self, path: &str, version: &str) -> Result<VersionInfo> {
        let url = self.urls().version_file(path, version, "info")?;
        let response = self.get(&url).await?;
        self.response_converter.convert_info(&url, response).await
    }

    async fn latest(&self, path: &str) -> Result<VersionInfo> {
        let url = self.urls().latest(path)?;
        let response = self.get(&url).await?;
        self.response_converter.convert_info(&url, response).await
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let url = self.urls().list(path)?;
        let response = self.get(&url).await?;
        self.response_converter.convert_list(&url, response).await
    }

    async fn mod_file(&self, path: &str, version: &str) -> Result<ContentStream> {
        self.get_content(path, version, "mod").await
    }

    async fn zip(&self, path: &str, version: &str) -> Result<ContentStream> {
        self.get_content(path, version, "zip").await
    }
}
