use crate::error::{ProxyError, Result};
use crate::traits::ModuleProxy;
use crate::types::{ContentStream, QueryKind, VersionInfo};
use crate::version::sort_versions;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// What a mock proxy does when queried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    Succeed,
    /// Fail with this HTTP status
    Status(u16),
    /// Fail like a refused connection, without a status code
    Unreachable,
    /// Never answer
    Hang,
}

/// Records which proxies were queried, in order
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, name: &str) {
        self.0.lock().unwrap().push(name.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Mock proxy for testing chain walks
#[derive(Debug, Clone)]
pub struct MockProxy {
    pub name: String,
    pub outcome: MockOutcome,
    pub log: CallLog,
}

impl MockProxy {
    pub fn new(name: &str, outcome: MockOutcome, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            log,
        }
    }

    async fn respond<T>(&self, kind: QueryKind, path: &str, value: impl FnOnce() -> T) -> Result<T> {
        self.log.record(&self.name);
        match self.outcome {
            MockOutcome::Succeed => Ok(value()),
            MockOutcome::Status(code) => {
                Err(ProxyError::status(format!("{}/{}/{}", self.name, path, kind), code))
            }
            MockOutcome::Unreachable => Err(ProxyError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("connection to {} refused", self.name),
            ))),
            MockOutcome::Hang => std::future::pending().await,
        }
    }

    fn version_info(&self, version: &str) -> VersionInfo {
        let value = json!({
            "Version": version,
            "Time": "2024-01-01T00:00:00Z",
            "Proxy": self.name,
        });
        VersionInfo::from_json(value.to_string().as_bytes()).unwrap()
    }
}

impl ModuleProxy for MockProxy {
    fn base_url(&self) -> &str {
        &self.name
    }

    async fn info(&self, path: &str, version: &str) -> Result<VersionInfo> {
        self.respond(QueryKind::Info, path, || self.version_info(version))
            .await
    }

    async fn latest(&self, path: &str) -> Result<VersionInfo> {
        self.respond(QueryKind::Latest, path, || self.version_info("v1.2.0"))
            .await
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        self.respond(QueryKind::List, path, || {
            let mut versions: Vec<String> = ["v1.2.0", "v1.0.0", "v1.1.0"]
                .iter()
                .map(|v| v.to_string())
                .collect();
            sort_versions(&mut versions);
            versions
        })
        .await
    }

    async fn mod_file(&self, path: &str, _version: &str) -> Result<ContentStream> {
        self.respond(QueryKind::ModFile, path, || {
            ContentStream::from_bytes(
                format!("{}/{}", self.name, path),
                format!("module {} // {}\n", path, self.name),
            )
        })
        .await
    }

    async fn zip(&self, path: &str, _version: &str) -> Result<ContentStream> {
        self.respond(QueryKind::Zip, path, || {
            ContentStream::from_bytes(format!("{}/{}", self.name, path), &b"PK\x03\x04"[..])
        })
        .await
    }
}

pub mod test_helpers {
    use super::*;
    use crate::chain::ProxyChain;
    use std::collections::HashMap;

    fn factory(
        outcomes: &[(&str, MockOutcome)],
        log: &CallLog,
    ) -> impl FnMut(&str) -> MockProxy {
        let outcomes: HashMap<String, MockOutcome> = outcomes
            .iter()
            .map(|(name, outcome)| (name.to_string(), *outcome))
            .collect();
        let log = log.clone();
        move |url: &str| {
            let outcome = outcomes.get(url).copied().unwrap_or(MockOutcome::Succeed);
            MockProxy::new(url, outcome, log.clone())
        }
    }

    /// Convenience-form chain of mocks; unnamed proxies succeed
    pub fn chain_of(
        spec: &str,
        outcomes: &[(&str, MockOutcome)],
    ) -> (ProxyChain<MockProxy>, CallLog) {
        let log = CallLog::default();
        let chain = ProxyChain::build_with(spec, factory(outcomes, &log));
        (chain, log)
    }

    /// Strict-form chain of mocks
    pub fn strict_chain_of(
        spec: &str,
        outcomes: &[(&str, MockOutcome)],
    ) -> Result<ProxyChain<MockProxy>> {
        let log = CallLog::default();
        ProxyChain::try_build_with(spec, factory(outcomes, &log))
    }
}
