//! Streaming chat entities: request/response shapes, stream events, the
//! per-request lifecycle state machine, and the transcript accumulator.

pub mod message;
pub mod phase;
pub mod stream;
pub mod transcript;
