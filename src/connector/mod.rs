//! Command connector
//!
//! Routes prefixed chat lines to the AI Tool Agent and renders its reply
//! back into chat. At most one command is in flight at a time; a second one
//! arriving meanwhile is rejected with a warning, not queued.
//!
//! Flow per command:
//! busy check -> processing message -> scene snapshot -> POST -> narrative
//! -> optional command list. Any failure becomes a chat error message.

pub mod busy;
pub mod render;

pub use busy::{BusyFlag, ProcessingGuard};
pub use render::Renderer;

use crate::agent::client::AgentClient;
use crate::agent::protocol::{AgentResponse, FoundryCommand};
use crate::agent::transport::AgentTransport;
use crate::core::config::ConnectorConfig;
use crate::core::error::Result;
use crate::host::{
    ChatHooks, ChatListener, HookOutcome, HostUser, Notifier, SceneSource, ToastLevel,
};
use crate::scene::SceneContext;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const CONNECTED_NOTICE: &str = "AI Tool Agent connected!";
pub const DISABLED_NOTICE: &str = "AI Tool Agent connection failed - module disabled";
pub const BUSY_WARNING: &str = "AI Tool Agent is already processing a command";

/// How a call to [`CommandConnector::handle_command`] ended
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Agent answered; these commands were displayed (possibly none)
    Completed { commands: Vec<FoundryCommand> },
    /// Another command was in flight, nothing was sent
    Rejected,
    /// Request or decoding failed; the message was posted to chat
    Failed(String),
}

/// Bridges host chat to the agent service
pub struct CommandConnector {
    client: AgentClient,
    scene: Arc<dyn SceneSource>,
    notifier: Arc<dyn Notifier>,
    renderer: Renderer,
    command_prefix: String,
    busy: BusyFlag,
}

impl CommandConnector {
    pub fn new(
        config: &ConnectorConfig,
        client: AgentClient,
        scene: Arc<dyn SceneSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            scene,
            notifier,
            renderer: Renderer::new(config.speaker_alias.clone()),
            command_prefix: config.command_prefix.clone(),
            busy: BusyFlag::new(),
        }
    }

    /// Probe the agent and, if it answers, start listening to chat
    ///
    /// Returns `false` when the probe failed. In that case no listener is
    /// registered and the connector stays inert.
    pub async fn initialize(self: &Arc<Self>, hooks: &mut ChatHooks) -> bool {
        tracing::info!("AI Tool Agent connector initializing");

        match self.check_health().await {
            Ok(health) => {
                tracing::info!(%health, "AI Tool Agent health check passed");
                self.notifier.toast(ToastLevel::Info, CONNECTED_NOTICE);
            }
            Err(e) => {
                tracing::error!(error = %e, "AI Tool Agent connection failed");
                self.notifier.toast(ToastLevel::Warn, DISABLED_NOTICE);
                return false;
            }
        }

        hooks.register(Arc::new(CommandListener {
            connector: Arc::clone(self),
        }));

        tracing::info!(prefix = %self.command_prefix, "AI Tool Agent connector ready");
        true
    }

    /// Single `GET /health`, no retry
    pub async fn check_health(&self) -> Result<Value> {
        self.client.check_health().await
    }

    /// Snapshot of the host's current scene
    pub fn scene_context(&self) -> SceneContext {
        SceneContext::capture(self.scene.as_ref())
    }

    pub fn is_processing(&self) -> bool {
        self.busy.is_processing()
    }

    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Send one command to the agent and render the outcome into chat
    pub async fn handle_command(&self, command: &str) -> CommandOutcome {
        let Some(_guard) = self.busy.try_acquire() else {
            tracing::warn!(%command, "command rejected while another is processing");
            self.notifier.toast(ToastLevel::Warn, BUSY_WARNING);
            return CommandOutcome::Rejected;
        };

        match self.submit(command).await {
            Ok(response) => CommandOutcome::Completed {
                commands: response.foundry_commands,
            },
            Err(e) => {
                let message = e.to_string();
                tracing::error!(error = %message, %command, "AI Tool Agent command failed");
                self.notifier
                    .post_message(self.renderer.error(&message))
                    .await;
                CommandOutcome::Failed(message)
            }
        }
    }

    async fn submit(&self, command: &str) -> Result<AgentResponse> {
        self.notifier
            .post_message(self.renderer.processing(command))
            .await;

        let context = self.scene_context();
        let response = self.client.parse_command(command, context).await?;
        tracing::info!(
            narrative = %response.narrative,
            commands = response.foundry_commands.len(),
            "AI Tool Agent response"
        );

        self.notifier
            .post_message(self.renderer.narrative(&response.narrative))
            .await;

        // Display only; nothing here touches host state
        if response.has_commands() {
            self.notifier
                .post_message(self.renderer.commands(&response.foundry_commands))
                .await;
        }

        Ok(response)
    }
}

/// Chat hook that claims lines starting with the command prefix
struct CommandListener {
    connector: Arc<CommandConnector>,
}

#[async_trait]
impl ChatListener for CommandListener {
    async fn on_chat_message(&self, text: &str) -> HookOutcome {
        match text.strip_prefix(self.connector.command_prefix()) {
            Some(command) => {
                self.connector.handle_command(command).await;
                HookOutcome::Handled
            }
            None => HookOutcome::Pass,
        }
    }
}

/// Bring up the connector for `user`
///
/// Only game masters get a connector. Returns the running connector, or
/// `None` if the user is not a GM or the agent did not answer the probe.
pub async fn install(
    config: &ConnectorConfig,
    user: &HostUser,
    transport: Arc<dyn AgentTransport>,
    scene: Arc<dyn SceneSource>,
    notifier: Arc<dyn Notifier>,
    hooks: &mut ChatHooks,
) -> Option<Arc<CommandConnector>> {
    if !user.is_gm {
        tracing::info!(user = %user.name, "not GM, AI Tool Agent connector disabled");
        return None;
    }

    let connector = Arc::new(CommandConnector::new(
        config,
        AgentClient::new(transport),
        scene,
        notifier,
    ));

    if connector.initialize(hooks).await {
        Some(connector)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::transport::RawResponse;
    use crate::core::error::ConnectorError;
    use crate::host::{ChatLog, HostScene, MessageKind, StaticScene};
    use std::sync::Mutex;

    /// GET answers with `health`; POST pops scripted replies in order
    struct ScriptedTransport {
        health: Option<RawResponse>,
        replies: Mutex<Vec<RawResponse>>,
        posts: Mutex<Vec<Value>>,
    }

    impl ScriptedTransport {
        fn new(health: Option<RawResponse>, replies: Vec<RawResponse>) -> Arc<Self> {
            Arc::new(Self {
                health,
                replies: Mutex::new(replies.into_iter().rev().collect()),
                posts: Mutex::new(Vec::new()),
            })
        }

        fn post_count(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AgentTransport for ScriptedTransport {
        async fn get(&self, _path: &str) -> Result<RawResponse> {
            self.health
                .clone()
                .ok_or_else(|| ConnectorError::Transport("connection refused".into()))
        }

        async fn post_json(&self, _path: &str, body: &Value) -> Result<RawResponse> {
            self.posts.lock().unwrap().push(body.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ConnectorError::Transport("no scripted reply".into()))
        }
    }

    fn healthy() -> Option<RawResponse> {
        Some(RawResponse::new(200, r#"{"status":"healthy"}"#))
    }

    fn connector_with(
        transport: Arc<ScriptedTransport>,
        scene: Option<HostScene>,
    ) -> (Arc<CommandConnector>, Arc<ChatLog>) {
        let log = Arc::new(ChatLog::new());
        let connector = Arc::new(CommandConnector::new(
            &ConnectorConfig::default(),
            AgentClient::new(transport),
            Arc::new(StaticScene::new(scene)),
            log.clone(),
        ));
        (connector, log)
    }

    #[tokio::test]
    async fn test_narrative_only() {
        let transport = ScriptedTransport::new(
            healthy(),
            vec![RawResponse::new(200, r#"{"narrative":"Orc attacks","foundry_commands":[]}"#)],
        );
        let (connector, log) = connector_with(transport, None);

        let outcome = connector.handle_command("orc attacks").await;
        assert_eq!(outcome, CommandOutcome::Completed { commands: vec![] });

        let kinds: Vec<_> = log.messages().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MessageKind::Processing, MessageKind::Narrative]);
        assert!(!connector.is_processing());
    }

    #[tokio::test]
    async fn test_narrative_then_commands() {
        let transport = ScriptedTransport::new(
            healthy(),
            vec![RawResponse::new(
                200,
                r#"{"narrative":"Move token","foundry_commands":[{"raw":"move(1,2)"}]}"#,
            )],
        );
        let (connector, log) = connector_with(transport, None);

        let outcome = connector.handle_command("move it").await;
        assert_eq!(
            outcome,
            CommandOutcome::Completed {
                commands: vec![FoundryCommand { raw: "move(1,2)".into() }]
            }
        );

        let messages = log.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].kind, MessageKind::Narrative);
        assert_eq!(messages[2].kind, MessageKind::Commands);
        assert!(messages[2].content.contains("move(1,2)"));
    }

    #[tokio::test]
    async fn test_server_error_renders_status() {
        let transport = ScriptedTransport::new(healthy(), vec![RawResponse::new(500, "boom")]);
        let (connector, log) = connector_with(transport, None);

        let outcome = connector.handle_command("anything").await;
        assert!(matches!(outcome, CommandOutcome::Failed(ref m) if m.contains("500")));

        assert!(log.messages_of(MessageKind::Narrative).is_empty());
        let errors = log.messages_of(MessageKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].content.contains("500"));
        assert!(!connector.is_processing());
    }

    #[tokio::test]
    async fn test_malformed_json_renders_error() {
        let transport = ScriptedTransport::new(healthy(), vec![RawResponse::new(200, "not json")]);
        let (connector, log) = connector_with(transport, None);

        let outcome = connector.handle_command("anything").await;
        assert!(matches!(outcome, CommandOutcome::Failed(_)));
        assert_eq!(log.messages_of(MessageKind::Error).len(), 1);
        assert!(!connector.is_processing());
    }

    #[tokio::test]
    async fn test_network_error_renders_error() {
        // No scripted replies, so the POST fails at the transport
        let transport = ScriptedTransport::new(healthy(), vec![]);
        let (connector, log) = connector_with(transport.clone(), None);

        let outcome = connector.handle_command("anything").await;
        assert!(matches!(outcome, CommandOutcome::Failed(ref m) if m.starts_with("Transport error")));
        assert_eq!(transport.post_count(), 1);

        let errors = log.messages_of(MessageKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].text.starts_with("❌ Error: Transport error"));
        assert!(log.messages_of(MessageKind::Narrative).is_empty());
        assert!(!connector.is_processing());
    }

    #[tokio::test]
    async fn test_context_reflects_scene() {
        let transport = ScriptedTransport::new(
            healthy(),
            vec![RawResponse::new(200, r#"{"narrative":"ok"}"#)],
        );
        let scene = HostScene {
            name: "Keep".into(),
            width: 3000,
            height: 2000,
            token_count: 5,
        };
        let (connector, _log) = connector_with(transport.clone(), Some(scene));

        connector.handle_command("look").await;

        let posts = transport.posts.lock().unwrap();
        assert_eq!(posts[0]["command"], "look");
        assert_eq!(posts[0]["context"]["sceneName"], "Keep");
        assert_eq!(posts[0]["context"]["tokenCount"], 5);
        assert_eq!(posts[0]["context"]["sceneSize"]["width"], 3000);
    }

    #[tokio::test]
    async fn test_rejected_while_busy() {
        let transport = ScriptedTransport::new(healthy(), vec![]);
        let (connector, log) = connector_with(transport.clone(), None);

        let _held = connector.busy.try_acquire().unwrap();
        let outcome = connector.handle_command("second").await;

        assert_eq!(outcome, CommandOutcome::Rejected);
        assert_eq!(transport.post_count(), 0);
        assert!(log.messages().is_empty());
        let warnings = log.toasts_at(ToastLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].text, BUSY_WARNING);
    }

    #[tokio::test]
    async fn test_initialize_registers_listener() {
        let transport = ScriptedTransport::new(
            healthy(),
            vec![RawResponse::new(200, r#"{"narrative":"Hello"}"#)],
        );
        let (connector, log) = connector_with(transport.clone(), None);
        let mut hooks = ChatHooks::new();

        assert!(connector.initialize(&mut hooks).await);
        assert_eq!(hooks.listener_count(), 1);
        assert_eq!(log.toasts_at(ToastLevel::Info)[0].text, CONNECTED_NOTICE);

        assert_eq!(hooks.dispatch("just chatting").await, HookOutcome::Pass);
        assert_eq!(transport.post_count(), 0);

        assert_eq!(hooks.dispatch("/ai say hello").await, HookOutcome::Handled);
        let posts = transport.posts.lock().unwrap();
        assert_eq!(posts[0]["command"], "say hello");
    }

    #[tokio::test]
    async fn test_failed_probe_registers_nothing() {
        let transport = ScriptedTransport::new(None, vec![]);
        let (connector, log) = connector_with(transport.clone(), None);
        let mut hooks = ChatHooks::new();

        assert!(!connector.initialize(&mut hooks).await);
        assert_eq!(hooks.listener_count(), 0);
        assert_eq!(log.toasts_at(ToastLevel::Warn)[0].text, DISABLED_NOTICE);

        assert_eq!(hooks.dispatch("/ai anything").await, HookOutcome::Pass);
        assert_eq!(transport.post_count(), 0);
        assert!(log.messages().is_empty());
    }

    #[tokio::test]
    async fn test_install_skips_players() {
        let transport = ScriptedTransport::new(healthy(), vec![]);
        let mut hooks = ChatHooks::new();
        let log = Arc::new(ChatLog::new());

        let installed = install(
            &ConnectorConfig::default(),
            &HostUser::player("Sam"),
            transport,
            Arc::new(StaticScene::default()),
            log.clone(),
            &mut hooks,
        )
        .await;

        assert!(installed.is_none());
        assert_eq!(hooks.listener_count(), 0);
        assert!(log.toasts().is_empty());
    }
}
