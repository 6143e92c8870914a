//! Read models for the queue monitor window.
//!
//! Snapshot counters for inbound/outbound traffic plus per-agent status.

use serde::{Deserialize, Serialize};

/// Aggregate queue counters reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub inbound_waiting: u32,
    pub inbound_agents_available: u32,
    pub inbound_agents_total: u32,
    pub outbound_active_campaigns: u32,
    pub outbound_calls_in_progress: u32,
    pub outbound_calls_today: u32,
}

/// Availability of a single agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Busy,
    Break,
    Offline,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Break => "break",
            Availability::Offline => "offline",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One agent row in the queue monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub id: String,
    pub name: String,
    pub status: Availability,
    /// Phone number of the call in progress, if any.
    pub current_call: Option<String>,
    /// Seconds on the current call.
    pub call_duration: Option<u32>,
}

impl AgentStatus {
    pub fn is_on_call(&self) -> bool {
        self.status == Availability::Busy && self.current_call.is_some()
    }
}
