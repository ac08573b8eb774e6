//! Food ordering client core
//!
//! Wires the storage, API client and catalog crates into one [`App`]:
//! a sled-backed token store, an authenticated [`ApiClient`] and the
//! services the screens call.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use api_client::{ApiClient, ApiError, ClientConfig};
pub use app_core::{CatalogBrowser, CatalogError, CatalogItem, CatalogLoader, FilterOptions};
pub use storage::{KvConfig, StorageError};

use api_client::{AuthService, MenuCategoryService, MerchantCategoryService, UserService};
use std::sync::Arc;
use storage::{KvStore, PersistentTokenStore, TokenStore};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Top-level error type
#[derive(Debug, Error)]
pub enum AppError {
    /// API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// API client settings
    pub api: ClientConfig,
    /// Token database settings
    pub storage: KvConfig,
}

impl AppConfig {
    /// Default storage, API settings taken from the environment
    pub fn from_env() -> Self {
        Self { api: ClientConfig::from_env(), storage: KvConfig::default() }
    }

    /// Use a different API configuration
    pub fn with_api(mut self, api: ClientConfig) -> Self {
        self.api = api;
        self
    }

    /// Use a different token database
    pub fn with_storage(mut self, storage: KvConfig) -> Self {
        self.storage = storage;
        self
    }
}

/// The wired-up client
#[derive(Clone)]
pub struct App {
    client: Arc<ApiClient>,
    tokens: Arc<PersistentTokenStore>,
    /// Login and logout
    pub auth: AuthService,
    /// The signed-in user's profile
    pub user: UserService,
    /// Menu items and merchants as catalog items
    pub catalog: CatalogLoader,
    /// Merchant categories
    pub merchant_categories: MerchantCategoryService,
    /// Menu categories
    pub menu_categories: MenuCategoryService,
}

impl App {
    /// Open the token database and build the client and services
    pub fn bootstrap(config: AppConfig) -> Result<Self> {
        tracing::info!("Starting client against {}", config.api.base_url);

        let kv = KvStore::new(config.storage)?;
        let tokens = Arc::new(PersistentTokenStore::new(kv));
        let client = Arc::new(ApiClient::new(config.api, tokens.clone())?);

        Ok(Self {
            auth: AuthService::new(client.clone()),
            user: UserService::new(client.clone()),
            catalog: CatalogLoader::new(client.clone()),
            merchant_categories: MerchantCategoryService::new(client.clone()),
            menu_categories: MenuCategoryService::new(client.clone()),
            client,
            tokens,
        })
    }

    /// The underlying API client
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// The persisted token store
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`)
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
