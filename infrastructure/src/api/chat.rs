//! HTTP chat gateway.
//!
//! Implements [`ChatGateway`] against the hub backend: the SSE streaming
//! endpoint, the one-shot stop endpoint, and the non-streaming chat
//! endpoint. The streaming reader runs on a spawned task feeding an mpsc
//! channel; per opened stream it emits zero or more fragments and then
//! exactly one terminal event, whether the end is server-driven
//! (sentinel, fault) or client-driven (cancellation token).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hub_application::{ChatGateway, GatewayError, StreamHandle};
use hub_domain::{ChatRequest, ChatResponse, RequestId, StreamError, StreamEvent};
use reqwest::Method;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::client::{map_http_error, map_status, HubApiClient};
use crate::api::sse::{take_complete_utf8, SseParser, SsePayload};
use crate::api::types::StopResponse;

const CHAT_ENDPOINT: &str = "api/ai/chat-kr";
const STREAM_ENDPOINT: &str = "api/ai/chat-stream";
const STOP_ENDPOINT: &str = "api/ai/chat-stop";

/// Channel capacity for stream events; fragments are small and the
/// consumer drains continuously, so a modest buffer suffices.
const EVENT_BUFFER: usize = 32;

/// Chat gateway over the backend's HTTP API.
pub struct HttpChatGateway {
    client: Arc<HubApiClient>,
    /// Per-request timeout for the streaming connection. Overrides the
    /// client's default timeout, which is sized for one-shot calls.
    stream_timeout: Duration,
}

impl HttpChatGateway {
    pub fn new(client: Arc<HubApiClient>) -> Self {
        Self {
            client,
            stream_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn open_stream(
        &self,
        request: &ChatRequest,
        id: &RequestId,
        cancel: CancellationToken,
    ) -> Result<StreamHandle, GatewayError> {
        let path = format!("{STREAM_ENDPOINT}/{id}");
        let response = self
            .client
            .request(Method::POST, &path)
            .timeout(self.stream_timeout)
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        debug!("Chat stream {} open", id);

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(read_stream(response, cancel, tx));

        Ok(StreamHandle::new(rx))
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        let response = self
            .client
            .request(Method::POST, CHAT_ENDPOINT)
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        response.json().await.map_err(map_http_error)
    }

    async fn stop_generation(&self, id: &RequestId) -> Result<bool, GatewayError> {
        let path = format!("{STOP_ENDPOINT}/{id}");
        let response = self
            .client
            .request(Method::POST, &path)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // No matching in-flight generation; normal outcome.
            return Ok(false);
        }
        if !status.is_success() {
            return Err(map_status(status));
        }

        let body: StopResponse = response.json().await.map_err(map_http_error)?;
        Ok(body.stopped)
    }
}

/// Drive one SSE response body to its terminal event.
async fn read_stream(
    mut response: reqwest::Response,
    cancel: CancellationToken,
    tx: mpsc::Sender<StreamEvent>,
) {
    let mut parser = SseParser::new();
    let mut utf8_buf: Vec<u8> = Vec::new();

    let terminal = 'read: loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                // Local abort; drop the connection by abandoning it.
                break 'read StreamEvent::Error(StreamError::Cancelled);
            }
            chunk = response.chunk() => match chunk {
                Ok(Some(bytes)) => {
                    utf8_buf.extend_from_slice(&bytes);
                    let text = take_complete_utf8(&mut utf8_buf);
                    for payload in parser.push(&text) {
                        match payload {
                            SsePayload::Fragment(fragment) => {
                                if tx.send(StreamEvent::Fragment(fragment)).await.is_err() {
                                    // Consumer went away; nothing left to report.
                                    return;
                                }
                            }
                            SsePayload::Done => break 'read StreamEvent::Completed,
                        }
                    }
                }
                Ok(None) => {
                    for payload in parser.finish() {
                        if let SsePayload::Fragment(fragment) = payload {
                            if tx.send(StreamEvent::Fragment(fragment)).await.is_err() {
                                return;
                            }
                        }
                    }
                    if parser.is_done() {
                        break 'read StreamEvent::Completed;
                    }
                    break 'read StreamEvent::Error(StreamError::transport(
                        "stream closed before completion",
                    ));
                }
                Err(e) => {
                    warn!("Chat stream read failed: {}", e);
                    break 'read StreamEvent::Error(StreamError::transport(e.to_string()));
                }
            }
        }
    };

    let _ = tx.send(terminal).await;
}
