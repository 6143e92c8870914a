//! HTTP queue feed for the queue monitor.

use std::sync::Arc;

use async_trait::async_trait;
use hub_application::{GatewayError, QueueFeed};
use hub_domain::{AgentStatus, QueueStatus};
use reqwest::Method;

use crate::api::client::{map_http_error, map_status, HubApiClient};
use crate::api::types::{AgentStatusDto, QueueStatusDto};

const QUEUE_STATUS_ENDPOINT: &str = "api/queue/status";
const QUEUE_AGENTS_ENDPOINT: &str = "api/queue/agents";

/// Queue feed over the backend's HTTP API.
pub struct HttpQueueFeed {
    client: Arc<HubApiClient>,
}

impl HttpQueueFeed {
    pub fn new(client: Arc<HubApiClient>) -> Self {
        Self { client }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, GatewayError> {
        let response = self
            .client
            .request(Method::GET, path)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        response.json().await.map_err(map_http_error)
    }
}

#[async_trait]
impl QueueFeed for HttpQueueFeed {
    async fn queue_status(&self) -> Result<QueueStatus, GatewayError> {
        let dto: QueueStatusDto = self.get_json(QUEUE_STATUS_ENDPOINT).await?;
        Ok(dto.into())
    }

    async fn agents(&self) -> Result<Vec<AgentStatus>, GatewayError> {
        let dtos: Vec<AgentStatusDto> = self.get_json(QUEUE_AGENTS_ENDPOINT).await?;
        Ok(dtos.into_iter().map(AgentStatus::from).collect())
    }
}
