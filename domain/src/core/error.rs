//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message is empty")]
    EmptyMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_display() {
        assert_eq!(DomainError::EmptyMessage.to_string(), "Message is empty");
    }
}
