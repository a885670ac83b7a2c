//! Seams to the tabletop host
//!
//! The connector never touches host internals directly. It reads the scene
//! through [`SceneSource`], writes through [`Notifier`] and receives input
//! through [`hooks::ChatHooks`].

pub mod console;
pub mod hooks;
pub mod log;

pub use console::{ConsoleNotifier, StaticScene};
pub use hooks::{ChatHooks, ChatListener, HookOutcome};
pub use log::ChatLog;

use async_trait::async_trait;
use uuid::Uuid;

/// What the host knows about its active scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostScene {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub token_count: usize,
}

/// Read access to the host's current scene
pub trait SceneSource: Send + Sync {
    /// The active scene, or `None` when nothing is loaded
    fn current_scene(&self) -> Option<HostScene>;
}

/// The user the host is running for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUser {
    pub name: String,
    /// Only game masters get the connector
    pub is_gm: bool,
}

impl HostUser {
    pub fn gm(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_gm: true,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_gm: false,
        }
    }
}

/// Category of a posted chat message, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Processing,
    Narrative,
    Commands,
    Error,
}

impl MessageKind {
    /// CSS class wrapping the message content
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Processing => "ai-processing",
            MessageKind::Narrative => "ai-narrative",
            MessageKind::Commands => "ai-commands",
            MessageKind::Error => "ai-error",
        }
    }
}

/// A message destined for the host chat log
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub speaker: String,
    pub kind: MessageKind,
    /// Plain-text form for terminals and logs
    pub text: String,
    /// HTML fragment; interpolated text is already escaped
    pub content: String,
}

impl ChatMessage {
    pub fn new(
        speaker: impl Into<String>,
        kind: MessageKind,
        text: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: speaker.into(),
            kind,
            text: text.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warn,
}

/// A transient pop-up notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
}

/// Output side of the host: chat log plus toast notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Append a message to the chat log
    async fn post_message(&self, message: ChatMessage);

    /// Show a toast notification
    fn toast(&self, level: ToastLevel, text: &str);
}
