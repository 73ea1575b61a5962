//! Transcript
//!
//! Append-only conversation log. Holds the logical turns (user and
//! assistant) in the order they were appended, and counts the tool
//! annotations that were shown alongside them without keeping them.
//!
//! Appending never renders anything. Each append returns a
//! [`TranscriptLine`] and the caller decides where to send it; the
//! coordinator forwards them to the surface as
//! [`ClientMessage::Line`](crate::messages::ClientMessage::Line).

use serde::{Deserialize, Serialize};

/// Marker shown in front of tool annotations
pub const TOOL_MARKER: &str = "🔧 ";

/// Who produced a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// User input
    User,
    /// Agent reply (or the error text standing in for it)
    Assistant,
}

/// One logical message in the conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this message
    pub role: TurnRole,
    /// Message content
    pub content: String,
}

/// Styling role of a rendered line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    /// A user turn
    User,
    /// An assistant turn
    Assistant,
    /// A tool annotation
    ToolUse,
}

impl LineRole {
    /// Style tag for surfaces
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::ToolUse => "tool_use",
        }
    }
}

impl From<TurnRole> for LineRole {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => Self::User,
            TurnRole::Assistant => Self::Assistant,
        }
    }
}

/// Render notification for one appended entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Styling role
    pub role: LineRole,
    /// Text to display
    pub text: String,
}

/// Append-only conversation log
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    annotations: usize,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn
    pub fn append_user(&mut self, text: impl Into<String>) -> TranscriptLine {
        self.append(TurnRole::User, text.into())
    }

    /// Append an assistant turn
    pub fn append_assistant(&mut self, text: impl Into<String>) -> TranscriptLine {
        self.append(TurnRole::Assistant, text.into())
    }

    /// Record a tool annotation. No turn is added.
    pub fn append_tool(&mut self, text: &str) -> TranscriptLine {
        self.annotations += 1;
        TranscriptLine {
            role: LineRole::ToolUse,
            text: format!("{TOOL_MARKER}{text}"),
        }
    }

    fn append(&mut self, role: TurnRole, content: String) -> TranscriptLine {
        let line = TranscriptLine {
            role: role.into(),
            text: content.clone(),
        };
        self.turns.push(Turn { role, content });
        line
    }

    /// Logical history in append order, without tool annotations
    #[must_use]
    pub fn export_history(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Borrow all turns
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been appended
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of tool annotations shown so far
    #[must_use]
    pub fn annotation_count(&self) -> usize {
        self.annotations
    }
}
