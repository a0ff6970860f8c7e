//! # HTTP Retrieval Utilities
//!
//! This module provides an asynchronous API client wrapper around `reqwest`.
//! Each client is built once with a fixed timeout budget, a default header
//! set and an optional forward proxy, and then reused for every request so
//! connections are pooled.
//!
//! Retries are deliberately absent here: a call is exactly one outbound
//! request, and the caller decides what to do with the classified failure.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Proxy, Url};
use serde_json::Value;

use super::error::FetchError;

/// Maximum number of characters of an error body kept in a [`FetchError`].
const ERROR_BODY_LIMIT: usize = 512;

/// A standardized container for API responses.
///
/// This struct wraps the decoded body along with the status of the
/// HTTP transaction.
#[derive(Debug)]
pub struct ApiResponse {
    /// The successfully decoded response body, if any.
    pub data: Option<Value>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

impl ApiResponse {
    /// Collapses the response into the decoded body or an `Upstream` error.
    pub fn into_result(self) -> Result<Value, FetchError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(FetchError::Decode("empty response body".to_string())),
            (false, _) => Err(FetchError::Upstream {
                status: self.status,
                body: self.error_body.unwrap_or_default(),
            }),
        }
    }
}

/// A reusable asynchronous HTTP client.
pub struct ApiClient {
    /// The underlying pooled client.
    inner: reqwest::Client,
    /// The per-request timeout the client was built with.
    timeout: Duration,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    /// * `timeout` - Total budget for a single request (connect + body).
    /// * `headers` - Headers attached to every request.
    /// * `proxy` - Optional forward proxy URL. When absent, system proxy
    ///   variables are ignored so the request goes out directly.
    ///
    /// # Errors
    /// Returns `FetchError::Config` if the proxy URL is invalid or the
    /// underlying client cannot be built.
    pub fn new(timeout: Duration, headers: HeaderMap, proxy: Option<&str>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers);

        builder = match proxy {
            Some(proxy_url) => {
                let proxy = Proxy::all(proxy_url)
                    .map_err(|e| FetchError::Config(format!("Invalid proxy URL: {}", e)))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let inner = builder
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { inner, timeout })
    }

    /// Performs a GET request and decodes the body as JSON.
    ///
    /// Non-2xx responses are not errors at this level; they are reported
    /// with `success: false` and the body captured as text.
    ///
    /// # Errors
    /// Returns `FetchError::Network` when no response was received and
    /// `FetchError::Decode` when a 2xx body is not valid JSON.
    pub async fn get(&self, url: Url) -> Result<ApiResponse, FetchError> {
        let response = self.inner.get(url).send().await.map_err(|e| self.network_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.network_error(e))?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(ApiResponse {
                    data: None,
                    error_body: None,
                    status: status.as_u16(),
                    success: true,
                });
            }
            let data = serde_json::from_str::<Value>(&body)
                .map_err(|e| FetchError::Decode(e.to_string()))?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            Ok(ApiResponse {
                data: None,
                error_body: Some(truncate(&body, ERROR_BODY_LIMIT)),
                status: status.as_u16(),
                success: false,
            })
        }
    }

    fn network_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Network(format!("request timed out after {}s", self.timeout.as_secs()))
        } else {
            // Strip the URL; bypass-service URLs carry API keys in the query string.
            FetchError::Network(e.without_url().to_string())
        }
    }
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies_intact() {
        assert_eq!(truncate("forbidden", 512), "forbidden");
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn failed_response_becomes_upstream_error() {
        let response = ApiResponse {
            data: None,
            error_body: Some("rate limited".into()),
            status: 429,
            success: false,
        };
        match response.into_result() {
            Err(FetchError::Upstream { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_proxy_is_a_configuration_error() {
        let result = ApiClient::new(Duration::from_secs(1), HeaderMap::new(), Some("http://[::1"));
        assert!(matches!(result, Err(FetchError::Config(_))));
    }
}
