//! Auth gateway port
//!
//! Login, current-user lookup, and token validation against the auth
//! backend.

use async_trait::async_trait;
use hub_domain::User;
use serde::{Deserialize, Serialize};

use crate::ports::chat_gateway::GatewayError;

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Gateway to the authentication backend.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for an authenticated user (with token).
    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError>;

    /// Fetch the user behind a token.
    async fn current_user(&self, token: &str) -> Result<User, GatewayError>;

    /// Check whether a token is still accepted by the backend.
    async fn validate_token(&self, token: &str) -> Result<bool, GatewayError>;
}
