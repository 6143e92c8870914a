//! Cancellation coordinator.
//!
//! Drives a user-initiated cancel for one request id:
//!
//! 1. fire the local cancellation token stored in the registry, if any;
//! 2. best-effort ask the server to stop generating for the same id;
//! 3. remove the registry entry regardless of how 1 and 2 went.
//!
//! Cancelling an id that already finished (or never existed) is a normal
//! outcome: UI actions and stream completion race arbitrarily. The call
//! then returns `false` and changes nothing.

use std::sync::Arc;

use hub_domain::RequestId;
use tracing::{debug, warn};

use crate::ports::chat_gateway::ChatGateway;
use crate::stream::registry::StreamRegistry;

/// Coordinates local abort and remote stop for in-flight streams.
pub struct CancellationCoordinator {
    registry: Arc<StreamRegistry>,
    gateway: Arc<dyn ChatGateway>,
}

impl CancellationCoordinator {
    pub fn new(registry: Arc<StreamRegistry>, gateway: Arc<dyn ChatGateway>) -> Self {
        Self { registry, gateway }
    }

    /// Cancel the request `id`.
    ///
    /// Returns `true` if at least one of the two signals (local abort,
    /// remote stop) succeeded.
    pub async fn cancel(&self, id: &RequestId) -> bool {
        // Local abort via the stored token, if the request is still known.
        let local = match self.registry.get(id) {
            Some(token) => {
                token.cancel();
                debug!("Local abort signalled for {}", id);
                true
            }
            None => false,
        };

        // Best-effort remote stop. Whether the server actually stopped
        // generating is unverified beyond its own answer; a failure here
        // is logged and folded into the result.
        let remote = match self.gateway.stop_generation(id).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Remote stop for {} failed: {}", id, e);
                false
            }
        };

        // Remove unconditionally; the terminal path may already have
        // done so, and remove is idempotent.
        self.registry.remove(id);

        local || remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hub_domain::{ChatRequest, ChatResponse};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio_util::sync::CancellationToken;

    use crate::ports::chat_gateway::{GatewayError, StreamHandle};

    /// Gateway stub whose remote stop answer is scripted.
    struct StubGateway {
        stop_found: bool,
        stop_fails: bool,
        stop_called: AtomicBool,
    }

    impl StubGateway {
        fn new(stop_found: bool) -> Self {
            Self {
                stop_found,
                stop_fails: false,
                stop_called: AtomicBool::new(false),
            }
        }

        fn failing() -> Self {
            Self {
                stop_found: false,
                stop_fails: true,
                stop_called: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ChatGateway for StubGateway {
        async fn open_stream(
            &self,
            _request: &ChatRequest,
            _id: &RequestId,
            _cancel: CancellationToken,
        ) -> Result<StreamHandle, GatewayError> {
            unimplemented!("not used by coordinator tests")
        }

        async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
            unimplemented!("not used by coordinator tests")
        }

        async fn stop_generation(&self, _id: &RequestId) -> Result<bool, GatewayError> {
            self.stop_called.store(true, Ordering::SeqCst);
            if self.stop_fails {
                Err(GatewayError::ConnectionError("stop endpoint down".into()))
            } else {
                Ok(self.stop_found)
            }
        }
    }

    #[tokio::test]
    async fn cancel_in_flight_fires_token_and_removes_entry() {
        let registry = Arc::new(StreamRegistry::new());
        let gateway = Arc::new(StubGateway::new(true));
        let coordinator = CancellationCoordinator::new(registry.clone(), gateway.clone());

        let id = RequestId::from("s2");
        let token = registry.create(&id).unwrap();

        assert!(coordinator.cancel(&id).await);
        assert!(token.is_cancelled());
        assert!(registry.get(&id).is_none());
        assert!(gateway.stop_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancel_unknown_id_returns_false() {
        let registry = Arc::new(StreamRegistry::new());
        let gateway = Arc::new(StubGateway::new(false));
        let coordinator = CancellationCoordinator::new(registry.clone(), gateway);

        assert!(!coordinator.cancel(&RequestId::from("unknown-id")).await);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn second_cancel_returns_false() {
        let registry = Arc::new(StreamRegistry::new());
        let gateway = Arc::new(StubGateway::new(false));
        let coordinator = CancellationCoordinator::new(registry.clone(), gateway);

        let id = RequestId::from("s1");
        registry.create(&id).unwrap();

        assert!(coordinator.cancel(&id).await);
        assert!(!coordinator.cancel(&id).await);
    }

    #[tokio::test]
    async fn local_abort_succeeds_even_when_remote_stop_errors() {
        let registry = Arc::new(StreamRegistry::new());
        let gateway = Arc::new(StubGateway::failing());
        let coordinator = CancellationCoordinator::new(registry.clone(), gateway);

        let id = RequestId::from("s1");
        registry.create(&id).unwrap();

        // Remote side is down; the local signal still counts.
        assert!(coordinator.cancel(&id).await);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn remote_stop_alone_counts_as_success() {
        // Entry already gone locally (terminal path won the race), but
        // the server still had a matching generation.
        let registry = Arc::new(StreamRegistry::new());
        let gateway = Arc::new(StubGateway::new(true));
        let coordinator = CancellationCoordinator::new(registry, gateway);

        assert!(coordinator.cancel(&RequestId::from("s9")).await);
    }
}
