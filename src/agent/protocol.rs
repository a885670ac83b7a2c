//! Wire types for the AI Tool Agent HTTP API
//!
//! The agent turns a free-text command into a narrative line plus a list of
//! host commands. Responses are passed through for display and are not
//! checked beyond deserialization.

use crate::scene::SceneContext;
use serde::{Deserialize, Deserializer, Serialize};

/// Readiness probe endpoint
pub const HEALTH_PATH: &str = "/health";

/// Command submission endpoint
pub const PARSE_COMMAND_PATH: &str = "/parse_command";

/// Body of `POST /parse_command`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRequest {
    /// Command text with the chat prefix already stripped
    pub command: String,
    /// Scene snapshot taken when the command was submitted
    pub context: SceneContext,
}

/// Response of `POST /parse_command`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Text shown to the table
    pub narrative: String,
    /// Host commands proposed by the agent, in order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub foundry_commands: Vec<FoundryCommand>,
}

/// A single host command proposed by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundryCommand {
    /// Display form of the command
    pub raw: String,
}

impl AgentResponse {
    pub fn has_commands(&self) -> bool {
        !self.foundry_commands.is_empty()
    }
}

// Agents sometimes send `"foundry_commands": null` when they have nothing to do
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FoundryCommand>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FoundryCommand>>::deserialize(deserializer)?.unwrap_or_default())
}
