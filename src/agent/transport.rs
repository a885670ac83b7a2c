//! HTTP transport for the agent service
//!
//! The transport only moves bytes: it reports the status code and body and
//! leaves status policy and JSON decoding to [`AgentClient`]. That keeps the
//! request flow testable with a scripted transport.
//!
//! [`AgentClient`]: crate::agent::client::AgentClient

use crate::core::error::{ConnectorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response seam between the connector and the network
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Issue a GET for `path` relative to the agent base URL
    async fn get(&self, path: &str) -> Result<RawResponse>;

    /// POST `body` as JSON to `path` relative to the agent base URL
    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse>;
}

/// reqwest-backed transport
///
/// One attempt per call. No timeout is configured, so a request runs until
/// the server answers or the connection fails.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn into_raw(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ConnectorError::Transport(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl AgentTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConnectorError::Transport(e.to_string()))?;

        Self::into_raw(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ConnectorError::Transport(e.to_string()))?;

        Self::into_raw(response).await
    }
}
