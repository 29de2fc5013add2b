//! Request URLs for the module proxy protocol.
//!
//! Module paths and versions are case-escaped before they are put into a
//! URL: every upper-case ASCII letter becomes `!` followed by its lower-case
//! form, so `github.com/Azure/x` is requested as `github.com/!azure/x`.

use crate::error::{ProxyError, Result};

/// Escape a module path for use in a proxy URL
pub fn escape_path(path: &str) -> Result<String> {
    check_path(path).map_err(|reason| ProxyError::invalid_path(path, reason))?;
    Ok(escape(path))
}

/// Escape a version for use in a proxy URL
pub fn escape_version(version: &str) -> Result<String> {
    check_version(version).map_err(|reason| ProxyError::invalid_version(version, reason))?;
    Ok(escape(version))
}

/// Reverse [`escape_path`] / [`escape_version`]
pub fn unescape(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut bang = false;
    for c in escaped.chars() {
        if bang {
            if !c.is_ascii_lowercase() {
                return None;
            }
            out.push(c.to_ascii_uppercase());
            bang = false;
        } else if c == '!' {
            bang = true;
        } else if c.is_ascii_uppercase() {
            return None;
        } else {
            out.push(c);
        }
    }
    (!bang).then_some(out)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('!');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Punctuation allowed in paths and versions besides ASCII letters and digits
const SAFE_PUNCTUATION: &[char] = &['-', '.', '_', '~', '+'];

fn check_common(s: &str, allow_slash: bool) -> std::result::Result<(), String> {
    if s.is_empty() {
        return Err("empty string".to_string());
    }
    if let Some(c) = s.chars().find(|c| {
        !(c.is_ascii_alphanumeric() || SAFE_PUNCTUATION.contains(c) || (allow_slash && *c == '/'))
    }) {
        return Err(format!("invalid char {c:?}"));
    }
    Ok(())
}

fn check_path(path: &str) -> std::result::Result<(), String> {
    check_common(path, true)?;
    if path.starts_with('/') || path.ends_with('/') {
        return Err("leading or trailing slash".to_string());
    }
    for element in path.split('/') {
        match element {
            "" => return Err("double slash".to_string()),
            "." | ".." => return Err(format!("invalid path element {element:?}")),
            _ => {}
        }
    }
    Ok(())
}

fn check_version(version: &str) -> std::result::Result<(), String> {
    check_common(version, false)?;
    if version == "." || version == ".." {
        return Err("invalid version element".to_string());
    }
    Ok(())
}

/// Builder for the endpoint URLs of one proxy
#[derive(Debug, Clone)]
pub struct UrlBuilder<'a> {
    base_url: &'a str,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(base_url: &'a str) -> Self {
        Self { base_url }
    }

    /// `B/P/@v/list`
    pub fn list(&self, path: &str) -> Result<String> {
        Ok(format!("{}/{}/@v/list", self.base_url, escape_path(path)?))
    }

    /// `B/P/@latest`
    pub fn latest(&self, path: &str) -> Result<String> {
        Ok(format!("{}/{}/@latest", self.base_url, escape_path(path)?))
    }

    /// `B/P/@v/V.<suffix>` for `info`, `mod` and `zip`
    pub fn version_file(&self, path: &str, version: &str, suffix: &str) -> Result<String> {
        Ok(format!(
            "{}/{}/@v/{}.{}",
            self.base_url,
            escape_path(path)?,
            escape_version(version)?,
            suffix
        ))
    }
}
