//! In-memory chat log

use crate::host::{ChatMessage, MessageKind, Notifier, Toast, ToastLevel};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Maximum chat messages to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Bounded chat log that also records toasts
///
/// Oldest messages are dropped once the log is full. Toasts are kept in
/// full since they are rare.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Mutex<VecDeque<ChatMessage>>,
    toasts: Mutex<Vec<Toast>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)),
            toasts: Mutex::new(Vec::new()),
        }
    }

    /// Add a message, evicting the oldest when full
    pub fn push(&self, message: ChatMessage) {
        let mut messages = lock(&self.messages);
        if messages.len() >= MAX_LOG_ENTRIES {
            messages.pop_front();
        }
        messages.push_back(message);
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.messages).iter().cloned().collect()
    }

    /// Messages of one kind, oldest first
    pub fn messages_of(&self, kind: MessageKind) -> Vec<ChatMessage> {
        lock(&self.messages)
            .iter()
            .filter(|m| m.kind == kind)
            .cloned()
            .collect()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.toasts).clone()
    }

    /// Toasts at one level, oldest first
    pub fn toasts_at(&self, level: ToastLevel) -> Vec<Toast> {
        lock(&self.toasts)
            .iter()
            .filter(|t| t.level == level)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        lock(&self.messages).clear();
        lock(&self.toasts).clear();
    }
}

#[async_trait]
impl Notifier for ChatLog {
    async fn post_message(&self, message: ChatMessage) {
        self.push(message);
    }

    fn toast(&self, level: ToastLevel, text: &str) {
        lock(&self.toasts).push(Toast {
            level,
            text: text.to_string(),
        });
    }
}

// A panic while holding the lock leaves the log readable
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
