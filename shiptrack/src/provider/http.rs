//! HTTP client abstraction for testability.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::types::ProviderError;

/// Browser-like User-Agent. Several tracking sites reject obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Trait for asynchronous HTTP GET operations.
///
/// Lets adapters be exercised against canned responses instead of the
/// network.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request with extra headers and returns the body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `headers` - Slice of (header_name, header_value) tuples
    fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// HTTP client backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestClient {
    /// Creates a client with the given per-request timeout and User-Agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Creates a client with a custom timeout and the default User-Agent.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        Self::new(timeout, DEFAULT_USER_AGENT)
    }

    fn map_send_error(&self, url: &str, e: reqwest::Error) -> ProviderError {
        warn!(
            url,
            error = %e,
            is_connect = e.is_connect(),
            is_timeout = e.is_timeout(),
            "HTTP request failed"
        );
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::HttpError(format!("Request failed: {}", e))
        }
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ProviderError> {
        trace!(url, "HTTP GET request starting");

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "HTTP response received");

        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))?;

        trace!(url, bytes = bytes.len(), "HTTP response body read");
        Ok(bytes.to_vec())
    }
}
