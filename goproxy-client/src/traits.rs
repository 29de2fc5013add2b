use crate::error::Result;
use crate::types::{ContentStream, VersionInfo};
use std::future::Future;

/// Trait for a client talking to a single Go module proxy.
///
/// Implementations must fail with [`ProxyError::Status`](crate::ProxyError::Status)
/// carrying the exact status code when the proxy answers with anything other
/// than 200, and with an uncoded error for transport-level failures.
pub trait ModuleProxy: Send + Sync + Clone {
    /// Base URL of the proxy, without a trailing slash
    fn base_url(&self) -> &str;

    /// Look up one version; `version` may be a branch or other non-canonical query
    fn info(
        &self,
        path: &str,
        version: &str,
    ) -> impl Future<Output = Result<VersionInfo>> + Send;

    /// Look up the proxy's notion of the latest version
    fn latest(&self, path: &str) -> impl Future<Output = Result<VersionInfo>> + Send;

    /// List known versions, sorted in ascending semver order by the client
    fn list(&self, path: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Fetch the go.mod file of one version
    fn mod_file(
        &self,
        path: &str,
        version: &str,
    ) -> impl Future<Output = Result<ContentStream>> + Send;

    /// Fetch the zip archive of one version
    fn zip(
        &self,
        path: &str,
        version: &str,
    ) -> impl Future<Output = Result<ContentStream>> + Send;
}
