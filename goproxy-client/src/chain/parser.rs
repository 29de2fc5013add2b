//! Tokenizer for GOPROXY-style chain specifications.
//!
//! A specification is a list of proxy URLs separated by `,` or `|`. The
//! separator in front of a token decides when the walk may move on to it:
//! `,` only after a not-found-like failure, `|` after any failure.

/// Policy for crossing the edge into a chain entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Continue only when the previous failure was 404 or 410 (`,`)
    OnNotFoundOnly,
    /// Continue after any failure (`|`)
    OnAnyError,
}

impl FallbackPolicy {
    /// Policy introduced by a separator character
    pub fn from_separator(sep: char) -> Option<Self> {
        match sep {
            ',' => Some(Self::OnNotFoundOnly),
            '|' => Some(Self::OnAnyError),
            _ => None,
        }
    }

    pub fn separator(self) -> char {
        match self {
            Self::OnNotFoundOnly => ',',
            Self::OnAnyError => '|',
        }
    }
}

/// One raw token of a chain specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainToken<'a> {
    pub text: &'a str,
    /// Policy of the separator directly in front of this token; `None` for the first token
    pub incoming: Option<FallbackPolicy>,
}

/// Split a chain specification into tokens, left to right.
///
/// Sentinels are returned like any other token; callers decide what to skip.
pub fn parse_chain(spec: &str) -> Vec<ChainToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = spec;
    let mut incoming = None;

    while let Some(end) = rest.find([',', '|']) {
        tokens.push(ChainToken {
            text: &rest[..end],
            incoming,
        });
        incoming = rest[end..].chars().next().and_then(FallbackPolicy::from_separator);
        rest = &rest[end + 1..];
    }

    tokens.push(ChainToken {
        text: rest,
        incoming,
    });
    tokens
}

/// Whether a token names no backend (`direct`, `off` or empty)
pub fn is_sentinel(token: &str) -> bool {
    matches!(token, "direct" | "off" | "")
}
