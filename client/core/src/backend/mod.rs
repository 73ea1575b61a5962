//! Agent Backend Integration
//!
//! This module provides access to the remote agent router through a common
//! trait interface.
//!
//! # Available Backends
//!
//! - **Router**: the HTTP agent router (default)
//!
//! # Usage
//!
//! ```ignore
//! use agent_chat_core::backend::{AgentBackend, BackendConfig, OutboundPayload, RouterBackend};
//! use agent_chat_core::SessionKey;
//!
//! let backend = RouterBackend::new(BackendConfig::default())?;
//! let key = SessionKey::generate("web-demo-");
//! let reply = backend.send(&OutboundPayload::new("Hello!", &key)).await?;
//! ```

mod router;
mod traits;

pub use router::RouterBackend;
pub use traits::{
    AgentBackend, BackendConfig, InboundResult, OutboundPayload, DEFAULT_CREDENTIAL,
    DEFAULT_ENDPOINT,
};
