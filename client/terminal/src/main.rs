//! Agent Chat Terminal
//!
//! Line-oriented terminal surface for the agent router. It renders
//! everything the coordinator tells it to and forwards what the user types.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the default local router
//! agent-chat
//!
//! # Custom router and credential
//! agent-chat --endpoint http://10.0.0.5:8787/agent --credential rk-kitchen
//!
//! # With verbose logging (replaces the default filter)
//! RUST_LOG=debug agent-chat
//!
//! # Only the core's per-request logs
//! RUST_LOG=agent_chat_core=debug agent-chat
//! ```
//!
//! # Commands
//!
//! - `/audio <file.wav>`: send a recorded clip as a voice message
//! - `/history`: print the conversation as JSON
//! - `/quit`, `/exit`: leave
//!
//! # Environment Variables
//!
//! - `AGENT_CHAT_CONFIG`: configuration file path
//! - `AGENT_CHAT_ENDPOINT`, `AGENT_CHAT_CREDENTIAL`, `AGENT_CHAT_SESSION_PREFIX`,
//!   `AGENT_CHAT_CAPTURE_MS`: see `agent_chat_core::config`
//! - `RUST_LOG`: Log filter (default: `agent_chat=info,agent_chat_core=warn`)

mod input;
mod render;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agent_chat_core::{
    load_config, ClientMessage, ConfigOverrides, Coordinator, RouterBackend, WavFileCapture,
};

use crate::input::InputCommand;

/// Log filter used when `RUST_LOG` is unset or unparsable
const DEFAULT_LOG_FILTER: &str = "agent_chat=info,agent_chat_core=warn";

/// Terminal client for the agent router
#[derive(Debug, Parser)]
#[command(name = "agent-chat", version, about)]
struct Args {
    /// Configuration file (default: $XDG_CONFIG_HOME/agent-chat/config.toml)
    #[arg(long, env = "AGENT_CHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Router endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer credential for the router
    #[arg(long)]
    credential: Option<String>,

    /// Prefix for the generated session key
    #[arg(long)]
    session_prefix: Option<String>,

    /// Recording length in milliseconds
    #[arg(long)]
    capture_ms: Option<u64>,

    /// Do not show the greeting on start
    #[arg(long)]
    no_greeting: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            credential: self.credential.clone(),
            session_prefix: self.session_prefix.clone(),
            capture_ms: self.capture_ms,
            no_greeting: self.no_greeting,
        }
    }
}

/// Build the log filter from `RUST_LOG`, falling back to the defaults
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the transcript
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    let (mut config, source) = load_config(args.config.as_deref())?;
    config.apply_overrides(&args.overrides());
    config.validate()?;

    info!(?source, endpoint = %config.backend.endpoint, "Starting agent-chat");

    let backend = RouterBackend::new(config.backend.clone())?;

    // Coordinator -> terminal, plus the terminal's own notices
    let (tx, rx) = mpsc::channel::<ClientMessage>(100);
    let (notice_tx, notice_rx) = mpsc::channel::<String>(16);
    let mut coordinator = Coordinator::new(backend, config, tx);

    let renderer = tokio::spawn(render::run(rx, notice_rx, std::io::stdout()));

    coordinator.start().await;

    // One line at a time: the next input is not read until the current
    // dispatch has finished.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match input::parse(&line) {
            InputCommand::Empty => {}
            InputCommand::Text(text) => {
                coordinator.submit_text(&text).await;
            }
            InputCommand::Audio(path) => {
                let mut capture = WavFileCapture::new(path);
                coordinator.record_and_dispatch(&mut capture).await;
            }
            InputCommand::History => {
                let history = coordinator.export_history();
                notice_tx
                    .send(serde_json::to_string_pretty(&history)?)
                    .await?;
            }
            InputCommand::Help => notice_tx.send(input::HELP.to_string()).await?,
            InputCommand::Quit => break,
            InputCommand::Unknown(command) => {
                notice_tx
                    .send(format!("Unknown command: {command} ({})", input::HELP))
                    .await?;
            }
        }
    }

    info!(session_key = %coordinator.session_key(), "Shutting down");

    // Closing both channels ends the renderer
    drop(coordinator);
    drop(notice_tx);
    renderer.await??;

    Ok(())
}
