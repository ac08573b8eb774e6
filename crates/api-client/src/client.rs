//! Authenticated API client
//!
//! Every request reads the access token from the [`TokenStore`] right
//! before it is sent. When the backend answers 401 the client runs one
//! refresh-and-retry cycle:
//!
//! 1. take the refresh lock,
//! 2. if another request already rotated the token, reuse it,
//! 3. otherwise call `/api/Auth/refresh` once and store the new pair,
//! 4. re-send the original request exactly once.
//!
//! A 401 on the retry is returned to the caller. A failed refresh clears
//! both tokens and returns the original 401, leaving the logged-out
//! transition to the application.

use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::{self, ApiError};
use crate::models::{RefreshRequest, RefreshResponse};
use crate::request::{ApiRequest, ApiResponse, RawResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use storage::{TokenData, TokenStore};
use tokio::sync::Mutex;

/// Client for the ordering backend
///
/// Cheap to share behind an [`Arc`]; all methods take `&self`.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    /// Serializes refreshes so concurrent 401s share one refresh call
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Create a client that talks HTTP using the given configuration
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), tokens))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { transport, tokens, refresh_lock: Mutex::new(()) }
    }

    /// The token store this client reads credentials from
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Send an authenticated request and decode the response
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<ApiResponse<T>> {
        self.execute(&request).await?.decode()
    }

    /// Send a request without a bearer token and without refresh handling
    pub async fn send_anonymous<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>> {
        self.transport.send(&request, None).await?.error_for_status()?.decode()
    }

    /// GET a path and return the decoded body
    pub async fn get<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T> {
        Ok(self.send(ApiRequest::get(path)).await?.data)
    }

    /// POST a JSON body and return the decoded response body
    pub async fn post<B, T>(&self, path: impl Into<String>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Ok(self.send(ApiRequest::post(path).json_body(body)?).await?.data)
    }

    /// PUT a JSON body and return the decoded response body
    pub async fn put<B, T>(&self, path: impl Into<String>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Ok(self.send(ApiRequest::put(path).json_body(body)?).await?.data)
    }

    /// Refresh the stored tokens now, independent of any failed request
    ///
    /// On failure both tokens are cleared and the refresh error is returned.
    pub async fn refresh_session(&self) -> Result<TokenData> {
        let _guard = self.refresh_lock.lock().await;

        let current = self
            .tokens
            .get()
            .await?
            .ok_or_else(|| ApiError::status_error(401, "no stored session to refresh"))?;

        match self.request_refresh(&current).await {
            Ok(tokens) => {
                self.tokens.set(tokens.clone()).await?;
                tracing::info!("session refreshed");
                Ok(tokens)
            }
            Err(err) => {
                tracing::warn!(error = %err, "session refresh failed, clearing stored tokens");
                self.clear_tokens().await;
                Err(err)
            }
        }
    }

    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
        let sent_token = self.tokens.access_token().await?;
        let response = self.transport.send(request, sent_token.clone()).await?;

        if response.status != 401 || !request.refresh_on_unauthorized {
            return response.error_for_status();
        }

        tracing::debug!(path = %request.path, "unauthorized, attempting token refresh");
        let original = error::from_response(response.status, &response.body);
        let fresh = self.refresh_after_unauthorized(sent_token.as_deref(), original).await?;

        // Single retry; whatever it returns, including another 401, is final.
        self.transport.send(request, Some(fresh)).await?.error_for_status()
    }

    /// Obtain an access token to retry with, or give back `original`
    async fn refresh_after_unauthorized(
        &self,
        stale: Option<&str>,
        original: ApiError,
    ) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        let Some(current) = self.tokens.get().await? else {
            tracing::debug!("no stored tokens, cannot refresh");
            return Err(original);
        };

        if stale != Some(current.access_token.as_str()) {
            tracing::debug!("access token already rotated, retrying with it");
            return Ok(current.access_token);
        }

        match self.request_refresh(&current).await {
            Ok(tokens) => {
                let access_token = tokens.access_token.clone();
                self.tokens.set(tokens).await?;
                tracing::debug!("access token refreshed");
                Ok(access_token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, clearing stored tokens");
                self.clear_tokens().await;
                Err(original)
            }
        }
    }

    async fn request_refresh(&self, current: &TokenData) -> Result<TokenData> {
        let body = RefreshRequest {
            access_token: current.access_token.clone(),
            refresh_token: current.refresh_token.clone(),
        };
        let request = ApiRequest::post(endpoints::AUTH_REFRESH).without_refresh().json_body(&body)?;

        let response: RefreshResponse = self.send_anonymous(request).await?.data;
        if response.access_token.is_empty() {
            return Err(ApiError::Decode("refresh response has an empty access token".to_string()));
        }

        Ok(TokenData {
            access_token: response.access_token,
            refresh_token: response.refresh_token.unwrap_or_else(|| current.refresh_token.clone()),
        })
    }

    async fn clear_tokens(&self) {
        if let Err(err) = self.tokens.clear().await {
            tracing::warn!(error = %err, "failed to clear stored tokens");
        }
    }
}
