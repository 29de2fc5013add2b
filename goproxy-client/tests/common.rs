//! Shared helpers for goproxy-client integration tests

#![allow(dead_code)]

use goproxy_client::{ClientConfig, HttpProxy, ProxyChain};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const MODULE: &str = "example.com/m";

/// Client config used by every test: short timeout so failures stay fast
pub fn test_config() -> ClientConfig {
    ClientConfig::builder()
        .timeout_seconds(5)
        .user_agent("goproxy-client-tests")
        .build()
}

pub fn chain(spec: &str) -> ProxyChain<HttpProxy> {
    ProxyChain::new(spec, &test_config()).unwrap()
}

pub fn info_body(version: &str) -> serde_json::Value {
    json!({
        "Version": version,
        "Time": "2024-01-01T00:00:00Z",
    })
}

/// Mount a `.info` endpoint answering with `template`, expected `calls` times
pub async fn mount_info(
    server: &MockServer,
    module: &str,
    version: &str,
    template: ResponseTemplate,
    calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{module}/@v/{version}.info")))
        .respond_with(template)
        .expect(calls)
        .mount(server)
        .await;
}

/// Mount a `@v/list` endpoint answering with `template`, expected `calls` times
pub async fn mount_list(server: &MockServer, module: &str, template: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{module}/@v/list")))
        .respond_with(template)
        .expect(calls)
        .mount(server)
        .await;
}

/// URL of a local port nothing listens on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
