pub mod client;
pub mod response_converter;

pub use client::{build_http_client, HttpProxy};
pub use response_converter::ResponseConverter;
