//! Login use case.
//!
//! Exchanges credentials for a user through the auth gateway and keeps
//! the [`AuthSession`] bookkeeping consistent: failed attempts increment
//! the counter, success resets it and stamps the login time.

use std::sync::Arc;

use hub_domain::{AuthSession, User};
use thiserror::Error;
use tracing::{info, warn};

use crate::ports::auth_gateway::{AuthGateway, Credentials};
use crate::ports::chat_gateway::GatewayError;

/// Errors that can occur during login.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Login rejected: {0}")]
    Rejected(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for operator login.
pub struct LoginUseCase {
    gateway: Arc<dyn AuthGateway>,
}

impl LoginUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Attempt a login, updating `session` either way.
    pub async fn execute(
        &self,
        credentials: Credentials,
        session: &mut AuthSession,
    ) -> Result<User, LoginError> {
        match self.gateway.login(&credentials).await {
            Ok(user) => {
                session.record_login(user.clone());
                info!("Operator logged in: {}", user.display());
                Ok(user)
            }
            Err(GatewayError::Unauthorized) => {
                let attempts = session.record_failure();
                warn!(
                    "Login rejected for {} (attempt {})",
                    credentials.username, attempts
                );
                Err(LoginError::Rejected(format!(
                    "invalid credentials (attempt {attempts})"
                )))
            }
            Err(e) => {
                session.record_failure();
                Err(e.into())
            }
        }
    }

    /// Re-validate a stored session token against the backend.
    pub async fn validate(&self, session: &AuthSession) -> Result<bool, LoginError> {
        match session.token() {
            Some(token) => Ok(self.gateway.validate_token(token).await?),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedAuth {
        accept: bool,
    }

    #[async_trait]
    impl AuthGateway for FixedAuth {
        async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
            if self.accept {
                Ok(User {
                    id: "1".into(),
                    username: credentials.username.clone(),
                    name: "Agent One".into(),
                    department: "Inbound".into(),
                    role: "agent".into(),
                    token: "tok-1".into(),
                })
            } else {
                Err(GatewayError::Unauthorized)
            }
        }

        async fn current_user(&self, _token: &str) -> Result<User, GatewayError> {
            Err(GatewayError::Unauthorized)
        }

        async fn validate_token(&self, token: &str) -> Result<bool, GatewayError> {
            Ok(token == "tok-1")
        }
    }

    #[tokio::test]
    async fn successful_login_populates_session() {
        let use_case = LoginUseCase::new(Arc::new(FixedAuth { accept: true }));
        let mut session = AuthSession::new();

        let user = use_case
            .execute(Credentials::new("agent01", "pw"), &mut session)
            .await
            .unwrap();

        assert_eq!(user.username, "agent01");
        assert!(session.is_valid());
        assert_eq!(session.login_attempts(), 0);
        assert!(use_case.validate(&session).await.unwrap());
    }

    #[tokio::test]
    async fn rejected_login_counts_attempts() {
        let use_case = LoginUseCase::new(Arc::new(FixedAuth { accept: false }));
        let mut session = AuthSession::new();

        for expected in 1..=3 {
            let err = use_case
                .execute(Credentials::new("agent01", "bad"), &mut session)
                .await
                .unwrap_err();
            assert!(matches!(err, LoginError::Rejected(_)));
            assert_eq!(session.login_attempts(), expected);
        }
        assert!(!session.is_valid());
    }

    #[tokio::test]
    async fn validate_without_login_is_false() {
        let use_case = LoginUseCase::new(Arc::new(FixedAuth { accept: true }));
        let session = AuthSession::new();
        assert!(!use_case.validate(&session).await.unwrap());
    }
}
