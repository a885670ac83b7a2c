//! vtt-agent-connector - console host
//!
//! Stands in for the tabletop chat: every line typed here goes through the
//! same chat hooks the connector registers inside a real host. Lines that
//! start with the command prefix are sent to the AI Tool Agent; anything
//! else is echoed as ordinary chat.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use vtt_agent_connector::agent::HttpTransport;
use vtt_agent_connector::connector;
use vtt_agent_connector::core::config::ConnectorConfig;
use vtt_agent_connector::core::error::Result;
use vtt_agent_connector::host::{ChatHooks, ConsoleNotifier, HookOutcome, HostUser, StaticScene};

#[derive(Parser, Debug)]
#[command(name = "vtt-agent-connector")]
#[command(about = "Route tabletop chat commands to an AI Tool Agent")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Agent base URL, overrides the config file
    #[arg(long)]
    base_url: Option<String>,

    /// Name shown for the local user
    #[arg(long, default_value = "Gamemaster")]
    user: String,

    /// Run as a player instead of the GM (connector stays disabled)
    #[arg(long)]
    player: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("vtt_agent_connector=info")
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConnectorConfig::load(path)?,
        None => ConnectorConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
        config.validate()?;
    }

    let user = if args.player {
        HostUser::player(args.user)
    } else {
        HostUser::gm(args.user)
    };

    tracing::info!(base_url = %config.base_url, user = %user.name, "starting console host");

    let rt = Runtime::new()?;

    let transport = Arc::new(HttpTransport::new(config.normalized_base_url()));
    let scene = Arc::new(StaticScene::from_config(config.scene.as_ref()));
    let notifier = Arc::new(ConsoleNotifier::new());
    let mut hooks = ChatHooks::new();

    let installed = rt.block_on(connector::install(
        &config,
        &user,
        transport,
        scene,
        notifier,
        &mut hooks,
    ));

    println!("\n=== VTT AGENT CONNECTOR ===");
    if installed.is_some() {
        println!(
            "Use {}<command> to ask the agent. quit / q to exit.",
            config.command_prefix
        );
    } else {
        println!("Connector disabled. Chat is echoed only. quit / q to exit.");
    }
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim_end_matches(['\r', '\n']);

        if input.trim().is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if rt.block_on(hooks.dispatch(input)) == HookOutcome::Pass {
            println!("[{}] {}", user.name, input);
        }
    }

    tracing::info!("console host exiting");
    Ok(())
}
