//! Chat rendering for connector output
//!
//! Each message carries an HTML fragment for the host chat log and a plain
//! text form for terminals. All agent-supplied text is escaped before it is
//! placed in HTML.

use crate::agent::protocol::FoundryCommand;
use crate::host::{ChatMessage, MessageKind};

/// Builds chat messages under a fixed speaker alias
#[derive(Debug, Clone)]
pub struct Renderer {
    speaker: String,
}

impl Renderer {
    pub fn new(speaker: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
        }
    }

    /// Shown as soon as a command is accepted
    pub fn processing(&self, command: &str) -> ChatMessage {
        let text = format!("{} processing: \"{}\"...", self.speaker, command);
        let content = format!(
            "<div class=\"{}\"><i class=\"fas fa-spinner fa-spin\"></i> {} processing: \"{}\"...</div>",
            MessageKind::Processing.css_class(),
            escape_html(&self.speaker),
            escape_html(command)
        );
        self.message(MessageKind::Processing, text, content)
    }

    pub fn narrative(&self, narrative: &str) -> ChatMessage {
        let text = format!("📖 {}", narrative);
        let content = format!(
            "<div class=\"{}\"><strong>📖 {}</strong></div>",
            MessageKind::Narrative.css_class(),
            escape_html(narrative)
        );
        self.message(MessageKind::Narrative, text, content)
    }

    /// Lists proposed host commands in order; they are not executed
    pub fn commands(&self, commands: &[FoundryCommand]) -> ChatMessage {
        let mut text = String::from("Commands to execute:");
        let mut content = format!(
            "<div class=\"{}\"><strong>Commands to execute:</strong><ul>",
            MessageKind::Commands.css_class()
        );
        for command in commands {
            text.push_str(&format!("\n  - {}", command.raw));
            content.push_str(&format!("<li><code>{}</code></li>", escape_html(&command.raw)));
        }
        content.push_str("</ul></div>");
        self.message(MessageKind::Commands, text, content)
    }

    pub fn error(&self, error: &str) -> ChatMessage {
        let text = format!("❌ Error: {}", error);
        let content = format!(
            "<div class=\"{}\">❌ Error: {}</div>",
            MessageKind::Error.css_class(),
            escape_html(error)
        );
        self.message(MessageKind::Error, text, content)
    }

    fn message(&self, kind: MessageKind, text: String, content: String) -> ChatMessage {
        ChatMessage::new(self.speaker.clone(), kind, text, content)
    }
}

/// Escape text for inclusion in HTML element content or quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
