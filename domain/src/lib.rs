//! Domain layer for nexus-call-hub
//!
//! This crate contains the core entities and value objects of the call-hub
//! client: the streaming-chat vocabulary (events, lifecycle phases, the
//! transcript accumulator), request identifiers, the operator's auth
//! session, and the read models for the queue monitor and company chat.
//!
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Streaming chat
//!
//! A chat request produces a **stream**: zero or more text fragments
//! followed by exactly one terminal event. The caller folds fragments into
//! a [`Transcript`] and tracks the request through the [`StreamPhase`]
//! state machine (`Idle -> Streaming -> {Completed | Errored | Cancelled}`,
//! terminal phases absorbing).

pub mod chat;
pub mod core;
pub mod queue;
pub mod rooms;
pub mod session;

// Re-export commonly used types
pub use chat::{
    message::{ChatRequest, ChatResponse},
    phase::StreamPhase,
    stream::{StreamError, StreamEvent},
    transcript::Transcript,
};
pub use crate::core::{error::DomainError, id::RequestId};
pub use queue::{AgentStatus, Availability, QueueStatus};
pub use rooms::Room;
pub use session::{auth::AuthSession, user::User};
