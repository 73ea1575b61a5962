//! Terminal rendering of client messages
//!
//! All stdout output goes through [`run`], so terminal notices (help,
//! `/history`) stay in order with the lines the coordinator has queued.

use std::io::Write;

use tokio::sync::mpsc;

use agent_chat_core::{ClientMessage, LineRole};

/// Print coordinator messages and terminal notices until both channels close
///
/// Queued coordinator messages always go out before a notice, so a notice
/// sent after a dispatch returns is printed after that dispatch's lines.
pub async fn run<W: Write>(
    mut messages: mpsc::Receiver<ClientMessage>,
    mut notices: mpsc::Receiver<String>,
    mut out: W,
) -> std::io::Result<W> {
    loop {
        tokio::select! {
            biased;

            msg = messages.recv() => match msg {
                Some(msg) => writeln!(out, "{}", render(&msg))?,
                None => break,
            },
            Some(text) = notices.recv() => writeln!(out, "{text}")?,
        }
    }

    // Coordinator is gone; flush whatever notices are left
    while let Some(text) = notices.recv().await {
        writeln!(out, "{text}")?;
    }
    Ok(out)
}

/// Format a message for the terminal
pub fn render(msg: &ClientMessage) -> String {
    match msg {
        ClientMessage::SessionInfo { session_key } => format!("session: {session_key}"),
        ClientMessage::Status { state } => state.description().to_string(),
        ClientMessage::Line(line) => {
            let prefix = match line.role {
                LineRole::User => "you>",
                LineRole::Assistant => "agent>",
                LineRole::ToolUse => "     ",
            };
            format!("{prefix} {}", line.text)
        }
    }
}
