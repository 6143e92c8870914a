//! End-to-end streaming flow tests over a scripted in-process gateway.
//!
//! The mock transport honors the same contract as the HTTP adapter:
//! zero or more fragments, then exactly one terminal event, with the
//! cancellation token aborting delivery and surfacing the distinguished
//! cancelled error.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hub_application::{
    CancellationCoordinator, ChatGateway, GatewayError, RunChatUseCase, StreamHandle,
    StreamRegistry,
};
use hub_domain::{ChatRequest, ChatResponse, RequestId, StreamError, StreamEvent, StreamPhase};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Scripted gateway: feeds a fixed fragment list per opened stream.
struct ScriptedGateway {
    fragments: Vec<String>,
    /// Delay before the first fragment (lets tests cancel early).
    pre_delay: Duration,
    /// Delay between fragments.
    gap: Duration,
    /// Terminal event after the fragments (None = Completed).
    failure: Option<String>,
    /// Ids the stop endpoint was called with.
    stop_calls: Mutex<Vec<RequestId>>,
}

impl ScriptedGateway {
    fn completing(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|s| s.to_string()).collect(),
            pre_delay: Duration::ZERO,
            gap: Duration::ZERO,
            failure: None,
            stop_calls: Mutex::new(Vec::new()),
        }
    }

    fn stalled() -> Self {
        Self {
            pre_delay: Duration::from_secs(30),
            ..Self::completing(&["never delivered"])
        }
    }

    fn failing(fragments: &[&str], message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::completing(fragments)
        }
    }

    fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }
}

#[async_trait]
impl ChatGateway for ScriptedGateway {
    async fn open_stream(
        &self,
        _request: &ChatRequest,
        _id: &RequestId,
        cancel: CancellationToken,
    ) -> Result<StreamHandle, GatewayError> {
        let (tx, rx) = mpsc::channel(16);
        let fragments = self.fragments.clone();
        let pre_delay = self.pre_delay;
        let gap = self.gap;
        let failure = self.failure.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let _ = tx.send(StreamEvent::Error(StreamError::Cancelled)).await;
                    return;
                }
                _ = tokio::time::sleep(pre_delay) => {}
            }

            for fragment in fragments {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        let _ = tx.send(StreamEvent::Error(StreamError::Cancelled)).await;
                        return;
                    }
                    _ = tokio::time::sleep(gap) => {}
                }
                if tx.send(StreamEvent::Fragment(fragment)).await.is_err() {
                    return;
                }
            }

            let terminal = match failure {
                Some(message) => StreamEvent::Error(StreamError::transport(message)),
                None => StreamEvent::Completed,
            };
            let _ = tx.send(terminal).await;
        });

        Ok(StreamHandle::new(rx))
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        Ok(ChatResponse {
            response: format!("echo: {}", request.message),
        })
    }

    async fn stop_generation(&self, id: &RequestId) -> Result<bool, GatewayError> {
        self.stop_calls.lock().unwrap().push(id.clone());
        // Server finds a match only while the stream is scripted to stall.
        Ok(self.pre_delay > Duration::ZERO)
    }
}

fn harness(
    gateway: Arc<ScriptedGateway>,
) -> (Arc<StreamRegistry>, RunChatUseCase, CancellationCoordinator) {
    let registry = Arc::new(StreamRegistry::new());
    let use_case = RunChatUseCase::new(gateway.clone(), registry.clone());
    let coordinator = CancellationCoordinator::new(registry.clone(), gateway);
    (registry, use_case, coordinator)
}

#[tokio::test]
async fn fragments_accumulate_and_stream_completes() {
    let gateway = Arc::new(ScriptedGateway::completing(&["Hel", "lo"]));
    let (registry, use_case, _) = harness(gateway);

    let mut seen = Vec::new();
    let outcome = use_case
        .execute(ChatRequest::new("hi"), |_| {}, |f| seen.push(f.to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.text, "Hello");
    assert_eq!(outcome.phase, StreamPhase::Completed);
    assert!(outcome.is_completed());
    assert_eq!(seen, vec!["Hel", "lo"]);
    assert!(registry.is_empty(), "terminal path must clear the registry");
}

#[tokio::test]
async fn cancel_before_first_fragment_yields_cancelled() {
    let gateway = Arc::new(ScriptedGateway::stalled());
    let (registry, use_case, coordinator) = harness(gateway.clone());

    let (id_tx, mut id_rx) = mpsc::unbounded_channel();
    let use_case = Arc::new(use_case);
    let runner = {
        let use_case = use_case.clone();
        tokio::spawn(async move {
            use_case
                .execute(
                    ChatRequest::new("slow question"),
                    move |id| {
                        let _ = id_tx.send(id.clone());
                    },
                    |_| panic!("no fragment should arrive"),
                )
                .await
        })
    };

    let id = id_rx.recv().await.expect("id reported before streaming");
    // Give execute() a moment to register and open the stream.
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(coordinator.cancel(&id).await);

    let outcome = runner.await.unwrap().unwrap();
    assert_eq!(outcome.phase, StreamPhase::Cancelled);
    assert_eq!(outcome.text, "");
    assert!(registry.get(&id).is_none());
    assert_eq!(gateway.stop_calls.lock().unwrap().as_slice(), &[id]);
}

#[tokio::test]
async fn cancel_handle_is_registered_before_id_is_reported() {
    let gateway = Arc::new(ScriptedGateway::completing(&["x"]));
    let (registry, use_case, _) = harness(gateway);

    // A cancel issued the moment the caller learns the id must find the
    // token, not fall into a gap before registration.
    let mut id_was_registered = false;
    let outcome = use_case
        .execute(
            ChatRequest::new("hi"),
            |id| id_was_registered = registry.get(id).is_some(),
            |_| {},
        )
        .await
        .unwrap();

    assert!(id_was_registered);
    assert!(outcome.is_completed());
}

#[tokio::test]
async fn cancel_after_completion_returns_false() {
    let gateway = Arc::new(ScriptedGateway::completing(&["done"]));
    let (_registry, use_case, coordinator) = harness(gateway);

    let outcome = use_case
        .execute(ChatRequest::new("hi"), |_| {}, |_| {})
        .await
        .unwrap();
    assert!(outcome.is_completed());

    assert!(!coordinator.cancel(&outcome.id).await);
}

#[tokio::test]
async fn cancel_unknown_id_is_a_benign_false() {
    let gateway = Arc::new(ScriptedGateway::completing(&[]));
    let (registry, _use_case, coordinator) = harness(gateway);

    assert!(!coordinator.cancel(&RequestId::from("unknown-id")).await);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn transport_fault_keeps_partial_text() {
    let gateway = Arc::new(ScriptedGateway::failing(&["par", "tial"], "connection reset"));
    let (registry, use_case, _) = harness(gateway);

    let outcome = use_case
        .execute(ChatRequest::new("hi"), |_| {}, |_| {})
        .await
        .unwrap();

    assert_eq!(outcome.phase, StreamPhase::Errored);
    assert_eq!(outcome.text, "partial");
    assert!(registry.is_empty());
}

#[tokio::test]
async fn interleaved_streams_preserve_per_id_order() {
    let left = Arc::new(
        ScriptedGateway::completing(&["a1", "a2", "a3"]).with_gap(Duration::from_millis(3)),
    );
    let right = Arc::new(
        ScriptedGateway::completing(&["b1", "b2", "b3"]).with_gap(Duration::from_millis(2)),
    );

    // Shared registry: both streams are in flight at once with distinct ids.
    let registry = Arc::new(StreamRegistry::new());
    let left_case = RunChatUseCase::new(left, registry.clone());
    let right_case = RunChatUseCase::new(right, registry.clone());

    let (left_outcome, right_outcome) = tokio::join!(
        left_case.execute(ChatRequest::new("left"), |_| {}, |_| {}),
        right_case.execute(ChatRequest::new("right"), |_| {}, |_| {}),
    );

    assert_eq!(left_outcome.unwrap().text, "a1a2a3");
    assert_eq!(right_outcome.unwrap().text, "b1b2b3");
    assert!(registry.is_empty());
}

#[tokio::test]
async fn blank_message_is_rejected_before_any_network_work() {
    let gateway = Arc::new(ScriptedGateway::completing(&["x"]));
    let (registry, use_case, _) = harness(gateway);

    let err = use_case
        .execute(ChatRequest::new("   "), |_| {}, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        hub_application::RunChatError::Domain(hub_domain::DomainError::EmptyMessage)
    ));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn non_streaming_ask_round_trip() {
    let gateway = Arc::new(ScriptedGateway::completing(&[]));
    let (_registry, use_case, _) = harness(gateway);

    let text = use_case.ask(ChatRequest::new("ping")).await.unwrap();
    assert_eq!(text, "echo: ping");
}
