//! Token storage
//!
//! The token store is the single authority for the bearer credentials the
//! API client attaches to requests. Call sites read through it on every
//! request and never keep their own copy.
//!
//! Two implementations are provided:
//!
//! - [`MemoryTokenStore`] keeps the pair in process memory only.
//! - [`PersistentTokenStore`] fronts a [`KvStore`] with a process-wide cache
//!   that is filled on first use, so tokens survive restarts.

use crate::kv::KvStore;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Access/refresh token pair returned by login and refresh
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    /// Bearer token attached to API requests
    pub access_token: String,
    /// Token exchanged for a new access token
    pub refresh_token: String,
}

impl TokenData {
    /// Create a token pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

// Tokens are credentials; keep them out of logs and panic messages.
impl fmt::Debug for TokenData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenData")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Store for the current token pair
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Get the stored token pair, if any
    async fn get(&self) -> Result<Option<TokenData>>;

    /// Replace the stored token pair
    async fn set(&self, tokens: TokenData) -> Result<()>;

    /// Remove both tokens
    async fn clear(&self) -> Result<()>;

    /// Get only the access token
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.get().await?.map(|tokens| tokens.access_token))
    }

    /// Get only the refresh token
    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.get().await?.map(|tokens| tokens.refresh_token))
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Token store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenData>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token pair
    pub fn with_tokens(tokens: TokenData) -> Self {
        Self { tokens: RwLock::new(Some(tokens)) }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<TokenData>> {
        Ok(self.tokens.read().await.clone())
    }

    async fn set(&self, tokens: TokenData) -> Result<()> {
        *self.tokens.write().await = Some(tokens);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.tokens.write().await = None;
        Ok(())
    }
}

// =============================================================================
// Persistent store
// =============================================================================

/// Token store backed by the key-value database
///
/// The two tokens are written under [`ACCESS_TOKEN_KEY`] and
/// [`REFRESH_TOKEN_KEY`]. Reads are served from an in-process cache that is
/// loaded from the database the first time it is needed; writes go to the
/// database first and then to the cache.
pub struct PersistentTokenStore {
    kv: KvStore,
    /// `None` until the first read loads the database
    cache: RwLock<Option<Option<TokenData>>>,
}

impl PersistentTokenStore {
    /// Create a store on top of an opened key-value database
    pub fn new(kv: KvStore) -> Self {
        Self { kv, cache: RwLock::new(None) }
    }

    fn load(&self) -> Result<Option<TokenData>> {
        let access: Option<String> = self.kv.get(ACCESS_TOKEN_KEY)?;
        let refresh: Option<String> = self.kv.get(REFRESH_TOKEN_KEY)?;

        match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => {
                Ok(Some(TokenData { access_token, refresh_token }))
            }
            (None, None) => Ok(None),
            _ => {
                // Only reachable with a database written by something else;
                // this store always writes and removes the pair together.
                tracing::warn!("incomplete token pair in storage, ignoring");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl TokenStore for PersistentTokenStore {
    async fn get(&self) -> Result<Option<TokenData>> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.load()?;
        tracing::debug!(present = loaded.is_some(), "loaded tokens from storage");
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    async fn set(&self, tokens: TokenData) -> Result<()> {
        let mut cache = self.cache.write().await;
        self.kv.set_all(&[
            (ACCESS_TOKEN_KEY, &tokens.access_token),
            (REFRESH_TOKEN_KEY, &tokens.refresh_token),
        ])?;
        *cache = Some(Some(tokens));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut cache = self.cache.write().await;
        self.kv.remove_all(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])?;
        *cache = Some(None);
        Ok(())
    }
}
