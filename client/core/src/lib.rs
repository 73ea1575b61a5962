//! Agent Chat Core - Headless Session Dispatch for agent-chat
//!
//! This crate provides the conversation core of the agent-chat client,
//! completely independent of any UI. It can drive a terminal, a web page,
//! a desktop shell, or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                            │
//! │     ┌──────────┐     ┌──────────┐     ┌──────────────────┐    │
//! │     │ Terminal │     │   Web    │     │     Headless     │    │
//! │     └────┬─────┘     └────┬─────┘     └────────┬─────────┘    │
//! │          └────────────────┴────────────────────┘              │
//! │                           │                                   │
//! │              text / voice input (calls, up)                   │
//! │              ClientMessage (channel, down)                    │
//! └───────────────────────────┼───────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼───────────────────────────────────┐
//! │                     AGENT CHAT CORE                            │
//! │  ┌────────────────────────┴─────────────────────────────────┐ │
//! │  │                      Coordinator                          │ │
//! │  │  ┌────────────┐  ┌────────────┐  ┌─────────────────────┐  │ │
//! │  │  │ SessionKey │  │ Transcript │  │ AgentBackend (HTTP) │  │ │
//! │  │  └────────────┘  └────────────┘  └─────────────────────┘  │ │
//! │  └──────────────────────────────────────────────────────────┘ │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Coordinator`]: owns the session key, dispatches turns, absorbs errors
//! - [`Transcript`]: append-only log of user/assistant turns
//! - [`AgentBackend`]: the router transport ([`RouterBackend`] over HTTP)
//! - [`ClientMessage`]: what the surface should render
//! - [`AudioCapture`]: where voice clips come from
//!
//! # Quick Start
//!
//! ```ignore
//! use agent_chat_core::{ClientConfig, Coordinator, RouterBackend};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let config = ClientConfig::from_env();
//!     let backend = RouterBackend::new(config.backend.clone())?;
//!     let mut coordinator = Coordinator::new(backend, config, tx);
//!
//!     coordinator.start().await;
//!     coordinator.submit_text("Turn on the kitchen lights").await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message to UI
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: router transport trait and HTTP implementation
//! - [`capture`]: audio capture interface and clip encoding
//! - [`config`]: configuration file, environment and overrides
//! - [`coordinator`]: the dispatch state machine
//! - [`error`]: transport, capture and dispatch errors
//! - [`messages`]: messages from the core to UI surfaces
//! - [`session`]: session key generation
//! - [`transcript`]: conversation log
//!
//! # No UI Dependencies
//!
//! Nothing in this crate prints or renders. Surfaces receive
//! [`ClientMessage`]s and decide how to show them.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod capture;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod messages;
pub mod session;
pub mod transcript;

// Re-exports for convenience
pub use backend::{AgentBackend, BackendConfig, InboundResult, OutboundPayload, RouterBackend};
pub use capture::{encode_base64, AudioCapture, AudioClip, AudioFormat, CaptureConfig, WavFileCapture};
pub use config::{
    default_config_path, load_config, load_config_from_path, ClientConfig, ClientToml,
    ConfigError, ConfigOverrides, ConfigSource,
};
pub use coordinator::{Coordinator, DispatchOutcome};
pub use error::{CaptureError, DispatchError, ErrorKind, TransportError};
pub use messages::{ClientMessage, ClientState};
pub use session::SessionKey;
pub use transcript::{LineRole, Transcript, TranscriptLine, Turn, TurnRole};
