//! Request identifiers for streaming chat.
//!
//! Each chat request gets an id built from a millisecond timestamp and a
//! process-unique counter suffix. The registry keys cancellation handles
//! by this id, and the backend scopes both the SSE stream and the stop
//! endpoint to it. The scheme makes collisions unreachable in practice,
//! so a duplicate id in the registry indicates a caller bug.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Opaque identifier for a single chat request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

static COUNTER: AtomicU64 = AtomicU64::new(0);

impl RequestId {
    /// Generate a fresh id: `req-<millis>-<counter hex>`.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("req-{millis:x}-{seq:04x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
