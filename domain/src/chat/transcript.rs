//! Transcript accumulator for a single streaming chat request.
//!
//! Folds [`StreamEvent`]s into the display buffer the UI renders. The
//! transcript owns the request's [`StreamPhase`] and enforces the
//! delivery contract at the caller side:
//!
//! - fragments append in arrival order;
//! - the first terminal event decides the final phase;
//! - anything arriving after a terminal event is discarded. Cancellation
//!   does not suppress fragments already in flight, so a fragment may
//!   land just after a cancel; it must not reach the display buffer.

use crate::chat::phase::StreamPhase;
use crate::chat::stream::{StreamError, StreamEvent};

/// Accumulated text and lifecycle state for one chat request.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    text: String,
    phase: StreamPhase,
    error: Option<StreamError>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the stream as opened.
    pub fn begin(&mut self) {
        self.phase.begin();
    }

    /// Apply one event from the transport.
    ///
    /// Returns the fragment text when the event appended to the buffer,
    /// so callers can echo it incrementally.
    pub fn apply(&mut self, event: StreamEvent) -> Option<String> {
        if self.phase.is_terminal() {
            // Late delivery after completion or cancellation; drop it.
            return None;
        }
        match event {
            StreamEvent::Fragment(chunk) => {
                self.text.push_str(&chunk);
                Some(chunk)
            }
            StreamEvent::Completed => {
                self.phase.complete();
                None
            }
            StreamEvent::Error(err) => {
                if err.is_cancelled() {
                    self.phase.cancel();
                } else {
                    self.phase.fail();
                }
                self.error = Some(err);
                None
            }
        }
    }

    /// Mark the request cancelled from the coordinator path.
    ///
    /// Used when the caller cancels locally without waiting for the
    /// transport's cancellation event to arrive.
    pub fn mark_cancelled(&mut self) {
        self.phase.cancel();
        if self.phase == StreamPhase::Cancelled && self.error.is_none() {
            self.error = Some(StreamError::Cancelled);
        }
    }

    /// The accumulated response text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// The terminal error, if the stream errored or was cancelled.
    pub fn error(&self) -> Option<&StreamError> {
        self.error.as_ref()
    }

    /// Consume the transcript, returning the accumulated text.
    pub fn into_text(self) -> String {
        self.text
    }
}
