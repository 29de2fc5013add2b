use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for goproxy-client operations
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Error types for proxy chain construction and queries
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The proxy answered with a non-200 status
    #[error("GET {url}: {code} {reason}")]
    Status {
        url: String,
        code: u16,
        reason: String,
    },

    /// Request construction, connection, timeout or body read failure
    #[error("in GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("decoding response from GET {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed module path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("malformed version {version:?}: {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("no proxy URL found")]
    NoProxyConfigured,

    #[error("operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("{0}: {1}")]
    WithContext(String, Box<ProxyError>),
}

impl ProxyError {
    /// Create a status-coded error for a rejected request
    pub fn status<S: Into<String>>(url: S, code: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self::Status {
            url: url.into(),
            code,
            reason,
        }
    }

    pub fn transport<S: Into<String>>(url: S, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn decode<S: Into<String>>(url: S, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    pub fn invalid_path<S: Into<String>, R: Into<String>>(path: S, reason: R) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_version<S: Into<String>, R: Into<String>>(version: S, reason: R) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Wrap this error with a context message
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// Whether this error (or the one it wraps) is a cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::WithContext(_, inner) => inner.is_cancelled(),
            _ => false,
        }
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { url, code, reason } if reason.is_empty() => {
                format!("proxy returned status {code} for {url}")
            }
            Self::Status { url, code, reason } => {
                format!("proxy returned status {code} ({reason}) for {url}")
            }
            Self::NoProxyConfigured => {
                "No proxy configured: GOPROXY lists only direct, off or empty entries".to_string()
            }
            Self::ConfigNotFound { path } => {
                format!("Configuration file not found: {}", path.display())
            }
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            _ => self.to_string(),
        }
    }
}

/// Helper trait for adding context to results
pub trait ResultExt<T> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ProxyError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.into().with_context(context()))
    }
}
