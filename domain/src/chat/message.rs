//! Chat request/response value objects.
//!
//! These mirror the backend's chat endpoint shapes. A [`ChatRequest`] is
//! immutable input with no lifecycle beyond the call that produced it; a
//! [`ChatResponse`] is the non-streaming counterpart of a completed stream.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// A single chat message sent to the assistant backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Whether the message is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }

    /// Reject blank messages before any network work starts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_blank() {
            Err(DomainError::EmptyMessage)
        } else {
            Ok(())
        }
    }
}

/// The complete response from the non-streaming chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's full reply text.
    pub response: String,
}
