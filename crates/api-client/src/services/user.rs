//! Current user profile

use crate::endpoints;
use crate::models::{UpdateUserRequest, User};
use crate::{ApiClient, Result};
use std::sync::Arc;

/// Access to `/api/User`
#[derive(Clone)]
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    /// Create a new user service
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the signed-in user's profile
    pub async fn current(&self) -> Result<User> {
        self.client.get(endpoints::USER).await
    }

    /// Update the profile and return the stored result
    pub async fn update(&self, update: &UpdateUserRequest) -> Result<User> {
        let updated: Option<User> = self.client.put(endpoints::USER, update).await?;
        match updated {
            Some(user) => Ok(user),
            // Some deployments answer 204; read the profile back instead.
            None => self.current().await,
        }
    }
}
