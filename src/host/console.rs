//! Terminal stand-ins for the host chat log and scene

use crate::core::config::SceneConfig;
use crate::host::{ChatMessage, HostScene, Notifier, SceneSource, ToastLevel};
use async_trait::async_trait;

/// Prints chat messages and toasts to stdout
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    /// Terminal line for a chat message
    pub fn format_message(message: &ChatMessage) -> String {
        format!("[{}] {}", message.speaker, message.text)
    }

    pub fn format_toast(level: ToastLevel, text: &str) -> String {
        let tag = match level {
            ToastLevel::Info => "info",
            ToastLevel::Warn => "warn",
        };
        format!("({}) {}", tag, text)
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn post_message(&self, message: ChatMessage) {
        tracing::debug!(id = %message.id, kind = ?message.kind, "chat message");
        println!("{}", Self::format_message(&message));
    }

    fn toast(&self, level: ToastLevel, text: &str) {
        println!("{}", Self::format_toast(level, text));
    }
}

/// Scene that never changes, taken from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    scene: Option<HostScene>,
}

impl StaticScene {
    pub fn new(scene: Option<HostScene>) -> Self {
        Self { scene }
    }

    pub fn from_config(config: Option<&SceneConfig>) -> Self {
        Self::new(config.map(|c| HostScene {
            name: c.name.clone(),
            width: c.width,
            height: c.height,
            token_count: c.token_count,
        }))
    }
}

impl SceneSource for StaticScene {
    fn current_scene(&self) -> Option<HostScene> {
        self.scene.clone()
    }
}
