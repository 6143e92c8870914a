//! Run Chat use case.
//!
//! Executes one streaming chat request end to end: generates the request
//! id, registers a cancellation handle, opens the stream, folds incoming
//! events into a [`Transcript`], and tears the registry entry down on the
//! terminal event.
//!
//! One invocation handles exactly one request; the caller decides whether
//! to allow concurrent invocations with distinct ids (the REPL runs one
//! at a time, matching the original UI).

use std::sync::Arc;

use hub_domain::{ChatRequest, DomainError, RequestId, StreamError, StreamPhase, Transcript};
use thiserror::Error;
use tracing::{debug, info};

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::stream::registry::{RegistryError, StreamRegistry};

/// Errors that can occur while running a chat request.
#[derive(Error, Debug)]
pub enum RunChatError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Final result of one streaming chat request.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The request id the stream ran under.
    pub id: RequestId,
    /// Accumulated response text (possibly partial on error/cancel).
    pub text: String,
    /// Terminal phase: Completed, Errored, or Cancelled.
    pub phase: StreamPhase,
    /// The terminal error when the phase is Errored or Cancelled.
    pub error: Option<StreamError>,
}

impl ChatOutcome {
    pub fn is_completed(&self) -> bool {
        self.phase == StreamPhase::Completed
    }
}

/// Use case for running a streaming chat request.
pub struct RunChatUseCase {
    gateway: Arc<dyn ChatGateway>,
    registry: Arc<StreamRegistry>,
}

impl RunChatUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, registry: Arc<StreamRegistry>) -> Self {
        Self { gateway, registry }
    }

    /// Stream one request, invoking `on_fragment` for every fragment that
    /// reaches the transcript (post-terminal deliveries are dropped
    /// before the callback fires).
    ///
    /// The id is reported through `on_start` after the cancellation
    /// handle is registered but before any network work, so a cancel
    /// issued as soon as the caller learns the id always finds the
    /// token.
    pub async fn execute<S, F>(
        &self,
        request: ChatRequest,
        mut on_start: S,
        mut on_fragment: F,
    ) -> Result<ChatOutcome, RunChatError>
    where
        S: FnMut(&RequestId),
        F: FnMut(&str),
    {
        request.validate()?;

        let id = RequestId::generate();
        let token = self.registry.create(&id)?;
        on_start(&id);
        info!("Opening chat stream {}", id);

        let mut handle = match self.gateway.open_stream(&request, &id, token).await {
            Ok(handle) => handle,
            Err(e) => {
                // The stream never opened; the handle must not linger.
                self.registry.remove(&id);
                return Err(e.into());
            }
        };

        let mut transcript = Transcript::new();
        transcript.begin();

        while let Some(event) = handle.next_event().await {
            let terminal = event.is_terminal();
            if let Some(chunk) = transcript.apply(event) {
                on_fragment(&chunk);
            }
            if terminal {
                break;
            }
        }

        // Closed channel without a terminal event counts as a transport
        // fault; the adapter should never let this happen.
        if !transcript.phase().is_terminal() {
            transcript.apply(hub_domain::StreamEvent::Error(StreamError::transport(
                "stream ended without terminal event",
            )));
        }

        // Terminal path teardown; the cancel path may already have
        // removed the entry, which is fine.
        self.registry.remove(&id);

        debug!(
            "Stream {} finished: {} ({} bytes)",
            id,
            transcript.phase(),
            transcript.text().len()
        );

        let phase = transcript.phase();
        let error = transcript.error().cloned();
        Ok(ChatOutcome {
            id,
            text: transcript.into_text(),
            phase,
            error,
        })
    }

    /// Non-streaming exchange against the same backend.
    pub async fn ask(&self, request: ChatRequest) -> Result<String, RunChatError> {
        request.validate()?;
        let response = self.gateway.send(&request).await?;
        Ok(response.response)
    }
}
