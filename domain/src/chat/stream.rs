//! Streaming events for chat communication.
//!
//! [`StreamEvent`] represents individual events in a streaming chat
//! response, bridging the infrastructure-level transport (SSE fragments
//! from the backend) to the application layer for real-time display.
//!
//! For any opened stream the transport emits zero or more
//! [`Fragment`](StreamEvent::Fragment) events followed by exactly one
//! terminal event: [`Completed`](StreamEvent::Completed) when the server
//! sends its end-of-stream sentinel, or [`Error`](StreamEvent::Error)
//! carrying a [`StreamError`]. User cancellation is a distinguished error
//! kind, not a generic transport fault, so callers can render
//! "cancelled" instead of "failed".

use thiserror::Error;

/// Why a stream ended without completing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The user cancelled the request before the server finished.
    #[error("cancelled by user")]
    Cancelled,

    /// A network or server fault terminated the stream.
    #[error("stream transport error: {0}")]
    Transport(String),
}

impl StreamError {
    pub fn transport(message: impl Into<String>) -> Self {
        StreamError::Transport(message.into())
    }

    /// Check if this error represents a user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StreamError::Cancelled)
    }
}

/// An event in a streaming chat response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental piece of generated text, delivered in arrival order.
    Fragment(String),
    /// The server sent its end-of-stream sentinel; no more fragments.
    Completed,
    /// The stream ended abnormally (transport fault or cancellation).
    Error(StreamError),
}

impl StreamEvent {
    /// Returns the text content if this is a Fragment event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Fragment(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}
