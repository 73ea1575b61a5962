//! Input line parsing
//!
//! Turns one line typed at the prompt into something the main loop can act
//! on. Lines starting with `/` are commands; everything else is a message.

use std::path::PathBuf;

/// Help text for `/help`
pub const HELP: &str = "Commands: /audio <file.wav>, /history, /help, /quit";

/// What the user asked for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputCommand {
    /// Blank line
    Empty,
    /// A message for the agent
    Text(String),
    /// Send a recorded WAV file as a voice message
    Audio(PathBuf),
    /// Print the conversation as JSON
    History,
    /// Print the command list
    Help,
    /// Leave the client
    Quit,
    /// Unrecognized or malformed command
    Unknown(String),
}

/// Parse one input line
pub fn parse(line: &str) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        return InputCommand::Empty;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return InputCommand::Text(line.to_string());
    };

    let (command, arg) = match rest.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (rest, ""),
    };

    match command {
        "audio" if !arg.is_empty() => InputCommand::Audio(PathBuf::from(arg)),
        "history" => InputCommand::History,
        "help" => InputCommand::Help,
        "quit" | "exit" => InputCommand::Quit,
        _ => InputCommand::Unknown(line.to_string()),
    }
}
