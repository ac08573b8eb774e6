//! HTTP transport
//!
//! The transport sends one request and hands back whatever the server
//! answered, including non-2xx statuses. Status interpretation and the
//! token refresh cycle live in [`crate::client::ApiClient`], which keeps
//! them testable against a mocked transport.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request::{ApiRequest, HttpMethod, RawResponse};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;

/// Sends requests to the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request, attaching `Authorization: Bearer <token>` when a token is given
    ///
    /// Returns `Err` only when no response was received.
    async fn send(&self, request: &ApiRequest, bearer: Option<String>) -> Result<RawResponse, ApiError>;
}

/// Transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Create a transport from client configuration
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest, bearer: Option<String>) -> Result<RawResponse, ApiError> {
        let url = self.config.url(&request.path);

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.params.is_empty() {
            req = req.query(&request.params);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        req = req
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(token) = bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request to {} failed: {}", request.path, e)))?;

        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.as_str().to_string(), value_str.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response body: {}", e)))?;

        tracing::debug!(status, path = %request.path, "received response");

        Ok(RawResponse { status, headers, body: body.to_vec() })
    }
}
