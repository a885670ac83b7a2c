//! Inbound chat interception
//!
//! Listeners see each chat line in registration order. The first one that
//! reports [`HookOutcome::Handled`] consumes the line and the host skips its
//! default processing.

use async_trait::async_trait;
use std::sync::Arc;

/// Result of offering a chat line to a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Line consumed; stop propagation and suppress default handling
    Handled,
    /// Not for this listener
    Pass,
}

#[async_trait]
pub trait ChatListener: Send + Sync {
    async fn on_chat_message(&self, text: &str) -> HookOutcome;
}

/// Registry of chat listeners
#[derive(Default)]
pub struct ChatHooks {
    listeners: Vec<Arc<dyn ChatListener>>,
}

impl ChatHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn ChatListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Offer `text` to each listener until one handles it
    pub async fn dispatch(&self, text: &str) -> HookOutcome {
        for listener in &self.listeners {
            if listener.on_chat_message(text).await == HookOutcome::Handled {
                return HookOutcome::Handled;
            }
        }
        HookOutcome::Pass
    }
}
