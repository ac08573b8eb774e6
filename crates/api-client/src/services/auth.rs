//! Login and logout

use crate::endpoints;
use crate::models::{LoginRequest, LoginResponse};
use crate::request::ApiRequest;
use crate::{ApiClient, Result};
use serde::de::IgnoredAny;
use std::sync::Arc;
use storage::TokenData;

/// Session lifecycle against `/api/Auth`
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Log in and store the returned token pair
    ///
    /// A 401 here means bad credentials and is returned as is; it never
    /// triggers a token refresh.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenData> {
        let body = LoginRequest { username: username.to_string(), password: password.to_string() };
        let request = ApiRequest::post(endpoints::AUTH_LOGIN).without_refresh().json_body(&body)?;

        let response: LoginResponse = self.client.send_anonymous(request).await?.data;
        let tokens = TokenData::new(response.access_token, response.refresh_token);
        self.client.token_store().set(tokens.clone()).await?;

        tracing::info!(username, "logged in");
        Ok(tokens)
    }

    /// Log out
    ///
    /// The server call is best effort; local tokens are cleared whether or
    /// not it succeeds. Only a failure to clear the store is an error.
    pub async fn logout(&self) -> Result<()> {
        let request = ApiRequest::post(endpoints::AUTH_LOGOUT).without_refresh();
        if let Err(err) = self.client.send::<IgnoredAny>(request).await {
            tracing::warn!(error = %err, "server logout failed, clearing local session anyway");
        }

        self.client.token_store().clear().await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Whether a token pair is currently stored
    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.client.token_store().get().await?.is_some())
    }
}
