//! Chat gateway port
//!
//! Defines the interface for talking to the assistant backend: one
//! streaming endpoint, one non-streaming endpoint, and the remote stop
//! side-channel. Implementations (adapters) live in the infrastructure
//! layer.

use async_trait::async_trait;
use hub_domain::{ChatRequest, ChatResponse, RequestId, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Handle for receiving streaming events from an open chat stream.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. The sending side lives in the
/// transport adapter, which guarantees zero or more `Fragment` events
/// followed by exactly one terminal event per opened stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, or None once the channel closes.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all fragment text.
    ///
    /// Useful when streaming only matters at the transport level and the
    /// caller wants the final text.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Fragment(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed => return Ok(full_text),
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e.to_string()));
                }
            }
        }
        // Channel closed without a terminal event; return what we have
        Ok(full_text)
    }
}

/// Gateway to the assistant backend.
///
/// `open_stream` must honor the passed cancellation token: when it fires,
/// the transport aborts the connection and emits the cancelled terminal
/// event. `stop_generation` is the best-effort remote side of a cancel;
/// `Ok(false)` means the server found no matching in-flight generation,
/// which is a normal "already finished" outcome.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Open a streaming chat request scoped by `id`.
    async fn open_stream(
        &self,
        request: &ChatRequest,
        id: &RequestId,
        cancel: CancellationToken,
    ) -> Result<StreamHandle, GatewayError>;

    /// Single request/response exchange (no fragment sequence).
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError>;

    /// Ask the server to stop generating for `id`.
    async fn stop_generation(&self, id: &RequestId) -> Result<bool, GatewayError>;
}
