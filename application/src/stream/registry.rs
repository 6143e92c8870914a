//! Registry of in-flight stream cancellation handles.
//!
//! Holds at most one [`CancellationToken`] per request id. The registry
//! is mutated from two paths that may race: the transport's terminal
//! path and the coordinator's cancel path. Removal is therefore
//! idempotent, and a missing id always means "already finished", never
//! an error.
//!
//! The registry is an explicit object owned by the session wiring and
//! shared by `Arc`; it is torn down with the session.

use std::collections::HashMap;
use std::sync::Mutex;

use hub_domain::RequestId;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from registry operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// `create` was called for an id that is already in flight. The id
    /// generation scheme makes this unreachable in practice, so hitting
    /// it indicates a caller bug.
    #[error("Request id already in flight: {0}")]
    Duplicate(RequestId),
}

/// Mapping from request id to its cancellation handle.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    entries: Mutex<HashMap<RequestId, CancellationToken>>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh token for `id` and return it.
    ///
    /// Fails if `id` is already present.
    pub fn create(&self, id: &RequestId) -> Result<CancellationToken, RegistryError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.contains_key(id) {
            return Err(RegistryError::Duplicate(id.clone()));
        }
        let token = CancellationToken::new();
        entries.insert(id.clone(), token.clone());
        Ok(token)
    }

    /// Look up the token for `id`.
    ///
    /// `None` means the request already finished; callers must not treat
    /// it as an error state.
    pub fn get(&self, id: &RequestId) -> Option<CancellationToken> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(id).cloned()
    }

    /// Remove the entry for `id`.
    ///
    /// Idempotent: removing a missing id is a no-op. Returns whether an
    /// entry was actually removed.
    pub fn remove(&self, id: &RequestId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(id).is_some()
    }

    /// Number of in-flight requests.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
