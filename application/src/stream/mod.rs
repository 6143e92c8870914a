//! Stream coordination: the registry of in-flight cancellation handles
//! and the coordinator that drives a user cancel.

pub mod coordinator;
pub mod registry;
