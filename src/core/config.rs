//! Connector configuration with documented defaults
//!
//! The connector talks to exactly one agent service. Everything here has a
//! working default, so a config file is only needed to point at a different
//! host or to give the console binary a scene to report.

use crate::core::error::{ConnectorError, Result};
use serde::Deserialize;
use std::path::Path;

/// Address of the AI Tool Agent when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://192.168.100.21:8000";

/// Chat prefix that marks a line as an agent command (note the trailing space)
pub const DEFAULT_COMMAND_PREFIX: &str = "/ai ";

/// Speaker name attached to every chat message the connector posts
pub const DEFAULT_SPEAKER_ALIAS: &str = "AI Tool Agent";

/// Configuration for the command connector
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Base URL of the agent service, without a trailing slash
    ///
    /// `/health` and `/parse_command` are appended to this.
    pub base_url: String,

    /// Prefix a chat line must start with to be routed to the agent
    ///
    /// The prefix is stripped and the remainder is forwarded verbatim.
    pub command_prefix: String,

    /// Speaker alias for posted chat messages
    pub speaker_alias: String,

    /// Scene reported by the console host
    ///
    /// `None` means no active scene, so commands carry an empty context.
    pub scene: Option<SceneConfig>,
}

/// Static scene description for hosts without a live scene model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub token_count: usize,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            command_prefix: DEFAULT_COMMAND_PREFIX.into(),
            speaker_alias: DEFAULT_SPEAKER_ALIAS.into(),
            scene: None,
        }
    }
}

impl ConnectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string; missing keys keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: ConnectorConfig = toml::from_str(content)
            .map_err(|e| ConnectorError::ConfigError(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL with trailing slashes removed, ready for path joining
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConnectorError::ConfigError(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }

        if self.command_prefix.trim().is_empty() {
            return Err(ConnectorError::ConfigError(
                "command_prefix must not be blank".into(),
            ));
        }

        Ok(())
    }
}
