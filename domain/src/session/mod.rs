//! Operator session: user identity and authentication state.

pub mod auth;
pub mod user;
