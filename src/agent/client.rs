//! Async client for the AI Tool Agent
//!
//! Two calls: a readiness probe and command submission. Neither retries and
//! neither sets a timeout.

use crate::agent::protocol::{AgentResponse, CommandRequest, HEALTH_PATH, PARSE_COMMAND_PATH};
use crate::agent::transport::{AgentTransport, HttpTransport, RawResponse};
use crate::core::error::{ConnectorError, Result};
use crate::scene::SceneContext;
use serde_json::Value;
use std::sync::Arc;

/// Agent client over any [`AgentTransport`]
#[derive(Clone)]
pub struct AgentClient {
    transport: Arc<dyn AgentTransport>,
}

impl AgentClient {
    pub fn new(transport: Arc<dyn AgentTransport>) -> Self {
        Self { transport }
    }

    /// Client talking HTTP to `base_url`
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    /// Probe `GET /health` and return whatever JSON the agent sends back
    pub async fn check_health(&self) -> Result<Value> {
        let response = self.transport.get(HEALTH_PATH).await?;
        let response = ensure_success(response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Submit a command with its scene context to `POST /parse_command`
    ///
    /// # Errors
    /// * `Status` if the agent answers with a non-2xx code
    /// * `SerdeError` if the body is not a valid agent response
    /// * `Transport` if the request never completed
    pub async fn parse_command(
        &self,
        command: &str,
        context: SceneContext,
    ) -> Result<AgentResponse> {
        let request = CommandRequest {
            command: command.to_string(),
            context,
        };
        let body = serde_json::to_value(&request)?;

        let response = self.transport.post_json(PARSE_COMMAND_PATH, &body).await?;
        let response = ensure_success(response)?;

        let parsed: AgentResponse = serde_json::from_str(&response.body)?;
        tracing::debug!(
            narrative = %parsed.narrative,
            commands = parsed.foundry_commands.len(),
            "agent response"
        );
        Ok(parsed)
    }
}

fn ensure_success(response: RawResponse) -> Result<RawResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ConnectorError::Status(response.status))
    }
}
