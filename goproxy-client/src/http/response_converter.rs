use crate::error::{ProxyError, Result};
use crate::types::{ContentStream, VersionInfo};
use crate::version::sort_versions;
use reqwest::{Response, StatusCode};

/// Turns proxy responses into query results
#[derive(Clone, Debug, Default)]
pub struct ResponseConverter;

impl ResponseConverter {
    pub fn new() -> Self {
        Self
    }

    /// Reject anything but 200 with a status-coded error
    pub fn check_status(&self, url: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProxyError::status(url, status.as_u16()));
        }
        Ok(response)
    }

    pub async fn convert_info(&self, url: &str, response: Response) -> Result<VersionInfo> {
        let response = self.check_status(url, response)?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::transport(url, e))?;
        VersionInfo::from_json(&body).map_err(|e| ProxyError::decode(url, e))
    }

    pub async fn convert_list(&self, url: &str, response: Response) -> Result<Vec<String>> {
        let response = self.check_status(url, response)?;
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::transport(url, e))?;
        Ok(parse_version_list(&body))
    }

    pub fn convert_content(&self, url: &str, response: Response) -> Result<ContentStream> {
        let response = self.check_status(url, response)?;
        Ok(ContentStream::from_response(response))
    }
}

/// Parse a newline-delimited `@v/list` body into sorted versions
pub fn parse_version_list(body: &str) -> Vec<String> {
    let mut versions: Vec<String> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    sort_versions(&mut versions);
    versions
}
