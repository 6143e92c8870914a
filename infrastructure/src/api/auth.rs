//! HTTP auth gateway.
//!
//! Implements [`AuthGateway`] against `/auth/login`, `/auth/me`, and
//! `/auth/validate`. A successful login stores the bearer token on the
//! shared client so every later request carries it.

use std::sync::Arc;

use async_trait::async_trait;
use hub_application::{AuthGateway, Credentials, GatewayError};
use hub_domain::User;
use reqwest::Method;
use tracing::debug;

use crate::api::client::{map_http_error, map_status, HubApiClient};
use crate::api::types::{ApiEnvelope, LoginResponseData, UserInfoDto};

const LOGIN_ENDPOINT: &str = "auth/login";
const ME_ENDPOINT: &str = "auth/me";
const VALIDATE_ENDPOINT: &str = "auth/validate";

/// Auth gateway over the backend's HTTP API.
pub struct HttpAuthGateway {
    client: Arc<HubApiClient>,
}

impl HttpAuthGateway {
    pub fn new(client: Arc<HubApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        let response = self
            .client
            .request(Method::POST, LOGIN_ENDPOINT)
            .json(credentials)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        let envelope: ApiEnvelope<LoginResponseData> =
            response.json().await.map_err(map_http_error)?;
        if !envelope.success {
            return Err(GatewayError::Unauthorized);
        }
        let login = envelope
            .data
            .ok_or_else(|| GatewayError::RequestFailed("login response without data".into()))?;

        // The login payload carries only username + token; fetch the
        // full profile before handing the user to the session.
        let user = self.current_user(&login.token).await?;

        self.client.set_bearer_token(Some(login.token));
        debug!("Bearer token stored for {}", user.username);

        Ok(user)
    }

    async fn current_user(&self, token: &str) -> Result<User, GatewayError> {
        let response = self
            .client
            .request_with_token(Method::GET, ME_ENDPOINT, token)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        let envelope: ApiEnvelope<UserInfoDto> = response.json().await.map_err(map_http_error)?;
        let info = match (envelope.success, envelope.data) {
            (true, Some(info)) => info,
            _ => return Err(GatewayError::Unauthorized),
        };

        Ok(info.into_user(token.to_string()))
    }

    async fn validate_token(&self, token: &str) -> Result<bool, GatewayError> {
        let response = self
            .client
            .request_with_token(Method::POST, VALIDATE_ENDPOINT, token)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(map_status(status));
        }

        let envelope: ApiEnvelope<serde_json::Value> =
            response.json().await.map_err(map_http_error)?;
        Ok(envelope.success)
    }
}
