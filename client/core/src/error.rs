//! Dispatch Errors
//!
//! Failures that can occur while a turn is being dispatched. None of these
//! ever reach a surface as a Rust error: the coordinator converts them into
//! an assistant turn carrying [`DispatchError::user_text`]. The structured
//! [`ErrorKind`] is kept alongside so callers can tell failures apart without
//! matching on text.

use thiserror::Error;

/// Errors raised by an [`AgentBackend`](crate::backend::AgentBackend)
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be completed (connect, DNS, I/O)
    #[error("{0}")]
    Network(String),

    /// The router answered with a non-success status
    #[error("Router Error {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// A success response whose body is not the expected JSON shape
    #[error("invalid router response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors raised by an [`AudioCapture`](crate::capture::AudioCapture)
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Recording device unavailable or access denied
    #[error("{0}")]
    Device(String),

    /// The recorded clip could not be encoded
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Reading the clip source failed
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connectivity failure or non-success status
    Transport,
    /// Audio capture or encoding failure
    Capture,
    /// Success status with an unusable body
    Protocol,
}

/// Any failure absorbed by the coordinator during a dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The backend call failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The audio capture failed
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

impl DispatchError {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(TransportError::Decode(_)) => ErrorKind::Protocol,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Capture(_) => ErrorKind::Capture,
        }
    }

    /// Text shown to the user in place of the assistant's reply
    #[must_use]
    pub fn user_text(&self) -> String {
        match self {
            Self::Capture(err) => format!("Microphone error: {err}"),
            Self::Transport(err) => format!("Error: {err}"),
        }
    }
}
