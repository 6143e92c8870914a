//! Queue feed port: snapshot source for the queue monitor.

use async_trait::async_trait;
use hub_domain::{AgentStatus, QueueStatus};

use crate::ports::chat_gateway::GatewayError;

/// Read access to call-queue state.
#[async_trait]
pub trait QueueFeed: Send + Sync {
    /// Current aggregate queue counters.
    async fn queue_status(&self) -> Result<QueueStatus, GatewayError>;

    /// Per-agent status rows.
    async fn agents(&self) -> Result<Vec<AgentStatus>, GatewayError>;
}
