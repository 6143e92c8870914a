//! Shared HTTP client for the hub backend.
//!
//! One configured [`reqwest::Client`] per running app: base URL, JSON
//! headers, request timeout, and an optional bearer token attached to
//! every request once the operator has logged in.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use thiserror::Error;

use hub_application::GatewayError;

/// Errors from client construction and request plumbing.
#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configured HTTP client bound to one backend base URL.
pub struct HubApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: RwLock<Option<String>>,
}

impl HubApiClient {
    /// Build a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiClientError::InvalidBaseUrl("empty base URL".into()));
        }

        Ok(Self {
            http,
            base_url,
            bearer_token: RwLock::new(None),
        })
    }

    /// Attach (or clear) the bearer token used for subsequent requests.
    pub fn set_bearer_token(&self, token: Option<String>) {
        *self.bearer_token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    /// Absolute URL for a path under the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the stored bearer token applied.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        let token = self
            .bearer_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Start a request with an explicit bearer token (ignores the stored
    /// one); used by auth endpoints that validate a candidate token.
    pub fn request_with_token(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(token)
    }
}

/// Map a reqwest failure onto the gateway error taxonomy.
pub(crate) fn map_http_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Map a non-success status onto the gateway error taxonomy.
pub(crate) fn map_status(status: reqwest::StatusCode) -> GatewayError {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        GatewayError::Unauthorized
    } else {
        GatewayError::RequestFailed(format!("server returned {status}"))
    }
}
