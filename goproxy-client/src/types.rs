use crate::error::{ProxyError, Result};
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream, StreamExt};
use futures::Stream;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Information about one module version as reported by a proxy
#[derive(Debug, Clone, PartialEq)]
pub struct VersionInfo {
    /// Canonical version, which may differ from the queried one
    pub version: String,
    pub time: DateTime<Utc>,
    /// Every field of the proxy's JSON object, including unrecognized ones
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct InfoRecord {
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "Time")]
    time: DateTime<Utc>,
}

impl VersionInfo {
    /// Decode a `.info` / `@latest` JSON body
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        let record: InfoRecord = serde_json::from_slice(body)?;
        let fields: Map<String, Value> = serde_json::from_slice(body)?;
        Ok(Self {
            version: record.version,
            time: record.time,
            fields,
        })
    }
}

/// The five kinds of query a proxy answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Info,
    Latest,
    List,
    ModFile,
    Zip,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Info => "info",
            QueryKind::Latest => "latest",
            QueryKind::List => "list",
            QueryKind::ModFile => "mod",
            QueryKind::Zip => "zip",
        };
        f.write_str(name)
    }
}

/// Body of a `.mod` or `.zip` response
pub struct ContentStream {
    url: String,
    inner: BoxStream<'static, Result<Bytes>>,
}

impl ContentStream {
    pub fn new<S>(url: impl Into<String>, inner: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            url: url.into(),
            inner: inner.boxed(),
        }
    }

    /// Build a stream over bytes that are already in memory
    pub fn from_bytes(url: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new(url, stream::once(futures::future::ready(Ok(bytes.into()))))
    }

    /// Convert a reqwest response body into a stream
    pub fn from_response(response: reqwest::Response) -> Self {
        let url = response.url().to_string();
        let error_url = url.clone();
        let inner = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| ProxyError::transport(error_url.clone(), e)));
        Self::new(url, inner)
    }

    /// URL the content is read from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Read the whole body into memory
    pub async fn bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Copy the body into a writer, returning the number of bytes written
    pub async fn copy_to<W>(mut self, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.inner.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }
}

impl Stream for ContentStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ContentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStream").field("url", &self.url).finish()
    }
}
