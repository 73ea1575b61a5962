//! Coordinator - Session-Scoped Dispatch
//!
//! The Coordinator owns one conversation with the agent router. It:
//! - Holds the session key the router correlates turns by
//! - Turns text and voice input into router payloads
//! - Drives the status indicator around each round-trip
//! - Reconciles replies and failures into the transcript
//!
//! # Design Philosophy
//!
//! The Coordinator is UI-agnostic. It communicates with the surface only
//! through [`ClientMessage`]s on a channel, and it is the only place where
//! dispatch failures are handled: every error becomes an assistant turn and
//! nothing is returned to the surface as an `Err`.
//!
//! Every dispatch entry point takes `&mut self`, so a single instance can
//! never have two round-trips outstanding.

use tokio::sync::mpsc;

use crate::backend::{AgentBackend, OutboundPayload};
use crate::capture::{encode_base64, AudioCapture, AudioClip};
use crate::config::ClientConfig;
use crate::error::DispatchError;
use crate::messages::{ClientMessage, ClientState};
use crate::session::SessionKey;
use crate::transcript::{Transcript, TranscriptLine, Turn};

/// Annotation shown while a text turn is outstanding
pub const TEXT_WORKING_NOTE: &str = "Talking to Agent...";

/// Annotation shown while a voice turn is outstanding
pub const AUDIO_WORKING_NOTE: &str = "Transcribing audio (via Agent)...";

/// User turn recorded for a voice message
pub const AUDIO_PLACEHOLDER: &str = "(Sending audio...)";

/// How a dispatch ended
///
/// Purely informational: by the time this is returned the transcript
/// already holds the reply or the error text.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The router replied
    Replied {
        /// Backend iteration count, if reported
        iterations: Option<u64>,
    },
    /// The dispatch failed and the error text was appended instead
    Failed(DispatchError),
}

impl DispatchOutcome {
    /// Whether the router replied
    #[must_use]
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied { .. })
    }

    /// The absorbed error, if any
    #[must_use]
    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Replied { .. } => None,
        }
    }
}

/// The Coordinator - one conversation with the router
pub struct Coordinator<B: AgentBackend> {
    /// Configuration
    config: ClientConfig,
    /// Agent backend
    backend: B,
    /// Fixed for the lifetime of the instance
    session_key: SessionKey,
    /// Conversation log
    transcript: Transcript,
    /// Current status
    state: ClientState,
    /// Channel to the UI surface
    tx: mpsc::Sender<ClientMessage>,
}

impl<B: AgentBackend> Coordinator<B> {
    /// Create a new Coordinator with a freshly generated session key
    pub fn new(backend: B, config: ClientConfig, tx: mpsc::Sender<ClientMessage>) -> Self {
        let session_key = SessionKey::generate(&config.session_prefix);
        Self::with_session_key(backend, config, session_key, tx)
    }

    /// Create a Coordinator bound to a specific session key
    pub fn with_session_key(
        backend: B,
        config: ClientConfig,
        session_key: SessionKey,
        tx: mpsc::Sender<ClientMessage>,
    ) -> Self {
        tracing::debug!(session_key = %session_key, backend = backend.name(), "Coordinator created");
        Self {
            config,
            backend,
            session_key,
            transcript: Transcript::new(),
            state: ClientState::Online,
            tx,
        }
    }

    /// Get the session key
    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// Get current state
    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Get the transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Logical history in append order
    pub fn export_history(&self) -> Vec<Turn> {
        self.transcript.export_history()
    }

    /// Announce the session to the surface and show the greeting
    pub async fn start(&mut self) {
        self.send(ClientMessage::SessionInfo {
            session_key: self.session_key.clone(),
        })
        .await;
        self.set_state(ClientState::Online).await;

        if let Some(greeting) = self.config.greeting.clone() {
            let line = self.transcript.append_assistant(greeting);
            self.emit(line).await;
        }
    }

    /// Record a user turn and dispatch it as text
    ///
    /// Surrounding whitespace is trimmed. Empty input is ignored and
    /// returns `None`.
    pub async fn submit_text(&mut self, raw: &str) -> Option<DispatchOutcome> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let line = self.transcript.append_user(text);
        self.emit(line).await;
        Some(self.handle_text(text).await)
    }

    /// Dispatch a text turn
    ///
    /// The caller is expected to have appended the user turn already.
    pub async fn handle_text(&mut self, message: &str) -> DispatchOutcome {
        self.set_state(ClientState::Thinking).await;
        let outcome = self.dispatch(message.to_string(), TEXT_WORKING_NOTE).await;
        self.set_state(ClientState::Online).await;
        outcome
    }

    /// Dispatch a voice turn from an already-encoded clip
    pub async fn handle_audio(&mut self, clip: &AudioClip, base64: &str) -> DispatchOutcome {
        self.set_state(ClientState::Listening).await;
        let outcome = self.dispatch(clip.data_uri(base64), AUDIO_WORKING_NOTE).await;
        self.set_state(ClientState::Online).await;
        outcome
    }

    /// Record a clip, then dispatch it as a voice turn
    ///
    /// Capture failures are absorbed like transport failures: they become a
    /// `Microphone error: ...` assistant turn.
    pub async fn record_and_dispatch<C>(&mut self, capture: &mut C) -> DispatchOutcome
    where
        C: AudioCapture + ?Sized,
    {
        self.set_state(ClientState::Listening).await;

        let outcome = match capture.capture_clip(&self.config.capture).await {
            Ok(clip) => {
                let base64 = encode_base64(&clip);
                let line = self.transcript.append_user(AUDIO_PLACEHOLDER);
                self.emit(line).await;
                self.dispatch(clip.data_uri(&base64), AUDIO_WORKING_NOTE)
                    .await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Audio capture failed");
                self.absorb(DispatchError::from(e)).await
            }
        };

        self.set_state(ClientState::Online).await;
        outcome
    }

    /// One round-trip: annotate, send, reconcile
    async fn dispatch(&mut self, message: String, working_note: &str) -> DispatchOutcome {
        self.annotate(working_note).await;

        let payload = OutboundPayload::new(message, &self.session_key);
        match self.backend.send(&payload).await {
            Ok(result) => {
                let content = result.content.unwrap_or_else(|| {
                    tracing::warn!("Router reply has no content");
                    String::new()
                });
                let line = self.transcript.append_assistant(content);
                self.emit(line).await;

                let note = match result.iterations {
                    Some(n) => format!("Done in {n} backend iterations."),
                    None => "Done in an unknown number of backend iterations.".to_string(),
                };
                self.annotate(&note).await;

                DispatchOutcome::Replied {
                    iterations: result.iterations,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, session_key = %self.session_key, "Dispatch failed");
                self.absorb(DispatchError::from(e)).await
            }
        }
    }

    /// Turn an error into the assistant's reply
    async fn absorb(&mut self, err: DispatchError) -> DispatchOutcome {
        let line = self.transcript.append_assistant(err.user_text());
        self.emit(line).await;
        DispatchOutcome::Failed(err)
    }

    /// Show a tool annotation
    async fn annotate(&mut self, text: &str) {
        let line = self.transcript.append_tool(text);
        self.emit(line).await;
    }

    /// Set state and notify UI
    async fn set_state(&mut self, state: ClientState) {
        self.state = state;
        self.send(ClientMessage::Status { state }).await;
    }

    /// Forward a transcript line to the UI
    async fn emit(&self, line: TranscriptLine) {
        self.send(ClientMessage::Line(line)).await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: ClientMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
