//! Agent Backend Traits
//!
//! Trait and wire types for the remote agent router. The coordinator only
//! talks to the router through [`AgentBackend`], so tests can swap in a stub
//! without touching the network.
//!
//! # Wire Contract
//!
//! One POST per turn carrying [`OutboundPayload`]. The router keeps its own
//! conversation history keyed by `session_key`, so the client never resends
//! earlier turns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::session::SessionKey;

/// Default router endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/agent";

/// Default client credential
pub const DEFAULT_CREDENTIAL: &str = "rk-robot-1";

/// Request body for one turn
///
/// `message` is either the user's text or an audio data URI such as
/// `data:audio/wav;base64,...`. The router sniffs the `data:` prefix to tell
/// the two apart, so the prefix must reach it untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPayload {
    /// Text or audio data URI
    pub message: String,
    /// Correlation key for the router's server-side history
    pub session_key: String,
}

impl OutboundPayload {
    /// Build a payload for the given session
    pub fn new(message: impl Into<String>, session_key: &SessionKey) -> Self {
        Self {
            message: message.into(),
            session_key: session_key.as_str().to_string(),
        }
    }

    /// Whether this payload carries an audio data URI
    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.message.starts_with("data:")
    }
}

/// Decoded router reply
///
/// Fields are passed through as decoded; the transport does not validate
/// the shape beyond JSON typing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundResult {
    /// The assistant's final answer
    #[serde(default)]
    pub content: Option<String>,
    /// Number of backend processing steps (diagnostic only)
    #[serde(default)]
    pub iterations: Option<u64>,
}

impl InboundResult {
    /// Create a complete result
    pub fn new(content: impl Into<String>, iterations: u64) -> Self {
        Self {
            content: Some(content.into()),
            iterations: Some(iterations),
        }
    }
}

/// Agent backend trait
///
/// Implementations perform exactly one request per [`send`](Self::send)
/// call. No retries, no caching.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Get the backend name (e.g., "Router")
    fn name(&self) -> &str;

    /// Send one turn and wait for the complete reply
    async fn send(&self, payload: &OutboundPayload) -> Result<InboundResult, TransportError>;
}

/// Router connection configuration
///
/// Fixed for the lifetime of a client: one endpoint, one credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Full URL of the agent endpoint
    pub endpoint: String,
    /// Bearer credential sent with every request
    pub credential: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential: DEFAULT_CREDENTIAL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Create a configuration for an endpoint and credential
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential.into(),
        }
    }
}
