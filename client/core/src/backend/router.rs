//! Agent Router Backend
//!
//! HTTP backend for the agent router.
//!
//! # Router API
//!
//! - `POST <endpoint>` with `Authorization: Bearer <credential>` and a JSON
//!   body `{ "message": ..., "session_key": ... }`
//! - `2xx` replies with `{ "content": ..., "iterations": ... }`
//! - Anything else is an error whose body is surfaced verbatim

use async_trait::async_trait;

use super::traits::{AgentBackend, BackendConfig, InboundResult, OutboundPayload};
use crate::error::TransportError;

/// Agent router client
#[derive(Clone, Debug)]
pub struct RouterBackend {
    /// Endpoint and credential
    config: BackendConfig,
    /// HTTP client
    http_client: reqwest::Client,
}

impl RouterBackend {
    /// Create a new router backend
    ///
    /// Uses reqwest's default timeouts.
    pub fn new(config: BackendConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl AgentBackend for RouterBackend {
    fn name(&self) -> &'static str {
        "Router"
    }

    async fn send(&self, payload: &OutboundPayload) -> Result<InboundResult, TransportError> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            session_key = %payload.session_key,
            audio = payload.is_audio(),
            len = payload.message.len(),
            "Sending turn to router"
        );

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.credential)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Router request failed");
                TransportError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read router error body"
                    );
                    String::new()
                }
            };
            tracing::warn!(status = status.as_u16(), "Router returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let result: InboundResult = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        tracing::debug!(iterations = ?result.iterations, "Router replied");
        Ok(result)
    }
}
