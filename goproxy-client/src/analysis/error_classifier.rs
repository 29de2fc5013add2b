//! Decides whether a failure means "resource absent".
//!
//! Only errors that expose an HTTP-like status code can be not-found-like.
//! Transport failures, decode failures and cancellations never are.

use crate::error::ProxyError;
use std::error::Error as StdError;

const NOT_FOUND: u16 = 404;
const GONE: u16 = 410;

/// Capability of an error to report the status code that caused it
pub trait StatusCoded {
    /// The HTTP status code behind this error, if it has one
    fn status_code(&self) -> Option<u16>;
}

impl StatusCoded for ProxyError {
    fn status_code(&self) -> Option<u16> {
        match self {
            ProxyError::Status { code, .. } => Some(*code),
            ProxyError::Transport { source, .. } => source.status_code(),
            ProxyError::WithContext(_, inner) => inner.status_code(),
            _ => None,
        }
    }
}

impl StatusCoded for reqwest::Error {
    fn status_code(&self) -> Option<u16> {
        self.status().map(|s| s.as_u16())
    }
}

/// True iff the error carries status 404 (Not Found) or 410 (Gone)
pub fn is_not_found<E: StatusCoded + ?Sized>(err: &E) -> bool {
    matches!(err.status_code(), Some(NOT_FOUND | GONE))
}

/// Like [`is_not_found`], for arbitrary error values.
///
/// Walks the `source()` chain and classifies the first error that exposes a
/// status code.
pub fn is_not_found_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(code) = coded(e) {
            return matches!(code, NOT_FOUND | GONE);
        }
        current = e.source();
    }
    false
}

fn coded(err: &(dyn StdError + 'static)) -> Option<u16> {
    if let Some(proxy_err) = err.downcast_ref::<ProxyError>() {
        return proxy_err.status_code();
    }
    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
        return reqwest_err.status_code();
    }
    None
}
