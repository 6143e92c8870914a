//! Per-request stream lifecycle state machine.
//!
//! Every chat request moves through
//! `Idle -> Streaming -> {Completed | Errored | Cancelled}`. All three
//! terminal phases are absorbing: once a request has finished, no further
//! transition changes it. `Cancelled` is only reachable through an
//! explicit coordinator action; `Completed` and `Errored` are reachable
//! only from the transport's terminal event.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a single chat request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    /// Request created, stream not yet opened.
    #[default]
    Idle,
    /// Stream open; fragments may be arriving.
    Streaming,
    /// Server finished normally (sentinel received).
    Completed,
    /// Transport or server fault ended the stream.
    Errored,
    /// The user cancelled the request while it was streaming.
    Cancelled,
}

impl StreamPhase {
    /// Whether this phase is absorbing.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamPhase::Completed | StreamPhase::Errored | StreamPhase::Cancelled
        )
    }

    /// Transition from Idle to Streaming.
    ///
    /// No-op unless currently Idle.
    pub fn begin(&mut self) {
        if *self == StreamPhase::Idle {
            *self = StreamPhase::Streaming;
        }
    }

    /// Transition from Streaming to Completed.
    ///
    /// No-op if already terminal or never started.
    pub fn complete(&mut self) {
        if *self == StreamPhase::Streaming {
            *self = StreamPhase::Completed;
        }
    }

    /// Transition from Streaming to Errored.
    ///
    /// No-op if already terminal or never started.
    pub fn fail(&mut self) {
        if *self == StreamPhase::Streaming {
            *self = StreamPhase::Errored;
        }
    }

    /// Transition from Streaming to Cancelled.
    ///
    /// Only the cancellation coordinator path goes through here; the
    /// transport's terminal event never produces Cancelled on its own.
    /// No-op if already terminal or never started.
    pub fn cancel(&mut self) {
        if *self == StreamPhase::Streaming {
            *self = StreamPhase::Cancelled;
        }
    }

    /// Human-readable label for display purposes.
    pub fn label(&self) -> &'static str {
        match self {
            StreamPhase::Idle => "idle",
            StreamPhase::Streaming => "streaming",
            StreamPhase::Completed => "completed",
            StreamPhase::Errored => "errored",
            StreamPhase::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
