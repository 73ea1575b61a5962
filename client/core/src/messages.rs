//! Client Messages
//!
//! Messages sent from the coordinator to a UI surface. The surface is a pure
//! renderer: it appends lines and shows the status indicator exactly as it
//! is told, without interpreting anything.

use serde::{Deserialize, Serialize};

use crate::session::SessionKey;
use crate::transcript::TranscriptLine;

/// Messages from coordinator to surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Session information, sent once on start
    SessionInfo {
        /// The fixed session key
        session_key: SessionKey,
    },

    /// Status indicator change
    Status {
        /// The new state
        state: ClientState,
    },

    /// Append a line to the visible transcript and scroll to it
    Line(TranscriptLine),
}

/// Client operational states
///
/// `Online` is idle. `Thinking` and `Listening` are both "dispatching" and
/// differ only by what triggered the dispatch. There is no error state:
/// failures end up in the transcript and the client goes back to `Online`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientState {
    /// Ready for input
    #[default]
    Online,
    /// Dispatching a typed message
    Thinking,
    /// Recording or dispatching a voice message
    Listening,
}

impl ClientState {
    /// Status indicator text
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Online => "● Online",
            Self::Thinking => "● Thinking...",
            Self::Listening => "● Listening...",
        }
    }

    /// Whether a dispatch is outstanding
    #[must_use]
    pub fn is_dispatching(&self) -> bool {
        !matches!(self, Self::Online)
    }
}
