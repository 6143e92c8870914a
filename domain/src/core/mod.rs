//! Core domain types: errors and request identifiers.

pub mod error;
pub mod id;
