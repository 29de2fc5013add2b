//! Proxy chains: parsing GOPROXY-style specifications and walking them.

pub mod parser;
pub mod resolver;

pub use parser::{is_sentinel, parse_chain, ChainToken, FallbackPolicy};
pub use resolver::ProxyChain;
