//! Building proxy chains and running queries against them.
//!
//! A query is sent to the first proxy. When it fails, the policy stored on
//! the *next* entry decides whether the walk moves on: [`FallbackPolicy::OnNotFoundOnly`]
//! only for 404/410 failures, [`FallbackPolicy::OnAnyError`] for any failure
//! except cancellation. The first success wins and earlier errors are
//! dropped; when the walk stops, the last error is returned as is.

use crate::analysis::is_not_found;
use crate::chain::parser::{is_sentinel, parse_chain, FallbackPolicy};
use crate::config::{ClientConfig, DEFAULT_PROXY};
use crate::error::{ProxyError, Result};
use crate::http::{build_http_client, HttpProxy};
use crate::traits::ModuleProxy;
use crate::types::{ContentStream, QueryKind, VersionInfo};
use reqwest::Client;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl FallbackPolicy {
    /// Whether a failure of the previous entry lets the walk cross this edge
    pub fn permits(self, err: &ProxyError) -> bool {
        if err.is_cancelled() {
            return false;
        }
        match self {
            FallbackPolicy::OnNotFoundOnly => is_not_found(err),
            FallbackPolicy::OnAnyError => true,
        }
    }
}

/// A proxy after the first one, with the policy for falling back to it
#[derive(Debug, Clone)]
struct ChainEntry<B> {
    backend: B,
    incoming: FallbackPolicy,
}

/// An ordered, non-empty chain of module proxies
#[derive(Debug, Clone)]
pub struct ProxyChain<B = HttpProxy> {
    first: B,
    rest: Vec<ChainEntry<B>>,
    cancel: CancellationToken,
}

impl<B: ModuleProxy> ProxyChain<B> {
    /// Build a chain, falling back to [`DEFAULT_PROXY`] when `spec` names no proxy
    pub fn build_with<F>(spec: &str, mut make_backend: F) -> Self
    where
        F: FnMut(&str) -> B,
    {
        match Self::assemble(spec, &mut make_backend) {
            Some(chain) => chain,
            None => {
                debug!(spec, default = DEFAULT_PROXY, "no usable proxy, using default");
                Self::from_parts(make_backend(DEFAULT_PROXY), Vec::new())
            }
        }
    }

    /// Build a chain, failing when `spec` names no proxy
    pub fn try_build_with<F>(spec: &str, mut make_backend: F) -> Result<Self>
    where
        F: FnMut(&str) -> B,
    {
        Self::assemble(spec, &mut make_backend).ok_or(ProxyError::NoProxyConfigured)
    }

    fn assemble<F>(spec: &str, make_backend: &mut F) -> Option<Self>
    where
        F: FnMut(&str) -> B,
    {
        let mut live = parse_chain(spec)
            .into_iter()
            .filter(|token| !is_sentinel(token.text));

        let first = make_backend(live.next()?.text);
        let rest: Vec<ChainEntry<B>> = live
            .map(|token| ChainEntry {
                backend: make_backend(token.text),
                // Only the very first token has no separator in front of it
                incoming: token.incoming.unwrap_or(FallbackPolicy::OnNotFoundOnly),
            })
            .collect();

        debug!(spec, proxies = rest.len() + 1, "built proxy chain");
        Some(Self::from_parts(first, rest))
    }

    fn from_parts(first: B, rest: Vec<ChainEntry<B>>) -> Self {
        Self {
            first,
            rest,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort queries, without falling back, once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Number of proxies in the chain
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always false: a chain holds at least one proxy
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Proxies in the order they are tried
    pub fn backends(&self) -> impl Iterator<Item = &B> + '_ {
        std::iter::once(&self.first).chain(self.rest.iter().map(|entry| &entry.backend))
    }

    /// Proxies paired with the policy for falling back to them; `None` for the first
    pub fn entries(&self) -> impl Iterator<Item = (&B, Option<FallbackPolicy>)> + '_ {
        std::iter::once((&self.first, None)).chain(
            self.rest
                .iter()
                .map(|entry| (&entry.backend, Some(entry.incoming))),
        )
    }

    /// Info about one version of a module
    pub async fn info(&self, path: &str, version: &str) -> Result<VersionInfo> {
        self.walk(QueryKind::Info, |proxy| async move {
            proxy.info(path, version).await
        })
        .await
    }

    /// Info about the latest version of a module
    pub async fn latest(&self, path: &str) -> Result<VersionInfo> {
        self.walk(QueryKind::Latest, |proxy| async move { proxy.latest(path).await })
            .await
    }

    /// Known versions of a module, in ascending semver order
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        self.walk(QueryKind::List, |proxy| async move { proxy.list(path).await })
            .await
    }

    /// The go.mod file of one version
    pub async fn mod_file(&self, path: &str, version: &str) -> Result<ContentStream> {
        self.walk(QueryKind::ModFile, |proxy| async move {
            proxy.mod_file(path, version).await
        })
        .await
    }

    /// The zip archive of one version
    pub async fn zip(&self, path: &str, version: &str) -> Result<ContentStream> {
        self.walk(QueryKind::Zip, |proxy| async move {
            proxy.zip(path, version).await
        })
        .await
    }

    async fn walk<T, F, Fut>(&self, kind: QueryKind, attempt: F) -> Result<T>
    where
        F: Fn(B) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut outcome = self.attempt(kind, 0, &self.first, &attempt).await;

        for (index, entry) in self.rest.iter().enumerate() {
            let err = match outcome {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !entry.incoming.permits(&err) {
                debug!(
                    %kind,
                    policy = ?entry.incoming,
                    error = %err,
                    "stopping proxy chain walk"
                );
                return Err(err);
            }

            info!(
                %kind,
                next = entry.backend.base_url(),
                error = %err,
                "proxy failed, trying next proxy"
            );
            outcome = self.attempt(kind, index + 1, &entry.backend, &attempt).await;
        }

        outcome
    }

    async fn attempt<T, F, Fut>(
        &self,
        kind: QueryKind,
        index: usize,
        backend: &B,
        attempt: &F,
    ) -> Result<T>
    where
        F: Fn(B) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(ProxyError::Cancelled);
        }
        debug!(%kind, index, proxy = backend.base_url(), "querying proxy");

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ProxyError::Cancelled),
            result = attempt(backend.clone()) => result,
        }
    }
}

impl ProxyChain<HttpProxy> {
    /// Chain of HTTP proxies sharing one client, defaulting to [`DEFAULT_PROXY`]
    pub fn new(spec: &str, config: &ClientConfig) -> Result<Self> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(spec, client))
    }

    /// Chain of HTTP proxies sharing one client, failing when `spec` names no proxy
    pub fn try_new(spec: &str, config: &ClientConfig) -> Result<Self> {
        let client = build_http_client(config)?;
        Self::try_with_client(spec, client)
    }

    /// Chain built from [`ClientConfig::resolve_goproxy`]
    pub fn from_env(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.resolve_goproxy(), config)
    }

    pub fn with_client(spec: &str, client: Client) -> Self {
        Self::build_with(spec, |url| HttpProxy::new(url, client.clone()))
    }

    pub fn try_with_client(spec: &str, client: Client) -> Result<Self> {
        Self::try_build_with(spec, |url| HttpProxy::new(url, client.clone()))
    }
}

/// A chain is itself a proxy, so chains can be nested or passed where a
/// single proxy is expected.
impl<B: ModuleProxy> ModuleProxy for ProxyChain<B> {
    fn base_url(&self) -> &str {
        self.first.base_url()
    }

    async fn info(&self, path: &str, version: &str) -> Result<VersionInfo> {
        ProxyChain::info(self, path, version).await
    }

    async fn latest(&self, path: &str) -> Result<VersionInfo> {
        ProxyChain::latest(self, path).await
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        ProxyChain::list(self, path).await
    }

    async fn mod_file(&self, path: &str, version: &str) -> Result<ContentStream> {
        ProxyChain::mod_file(self, path, version).await
    }

    async fn zip(&self, path: &str, version: &str) -> Result<ContentStream> {
        ProxyChain::zip(self, path, version).await
    }
}
