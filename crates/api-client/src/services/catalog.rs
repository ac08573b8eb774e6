//! Menu items, merchants and their categories

use crate::endpoints;
use crate::models::{MenuCategory, MenuItem, Merchant, MerchantCategory};
use crate::{ApiClient, Result};
use std::sync::Arc;

/// Access to `/api/MenuItem`
#[derive(Clone)]
pub struct MenuItemService {
    client: Arc<ApiClient>,
}

impl MenuItemService {
    /// Create a new menu item service
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All menu items
    pub async fn list(&self) -> Result<Vec<MenuItem>> {
        self.client.get(endpoints::MENU_ITEMS).await
    }

    /// A single menu item
    pub async fn get(&self, id: &str) -> Result<MenuItem> {
        self.client.get(endpoints::menu_item(id)).await
    }

    /// Menu items sold by a merchant
    pub async fn by_merchant(&self, merchant_id: &str) -> Result<Vec<MenuItem>> {
        self.client.get(endpoints::menu_items_by_merchant(merchant_id)).await
    }

    /// Menu items in a menu category
    pub async fn by_category(&self, category_id: &str) -> Result<Vec<MenuItem>> {
        self.client.get(endpoints::menu_items_by_category(category_id)).await
    }
}

/// Access to `/api/Merchant`
#[derive(Clone)]
pub struct MerchantService {
    client: Arc<ApiClient>,
}

impl MerchantService {
    /// Create a new merchant service
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All merchants
    pub async fn list(&self) -> Result<Vec<Merchant>> {
        self.client.get(endpoints::MERCHANTS).await
    }

    /// A single merchant
    pub async fn get(&self, id: &str) -> Result<Merchant> {
        self.client.get(endpoints::merchant(id)).await
    }

    /// Merchants in a merchant category
    pub async fn by_category(&self, category_id: &str) -> Result<Vec<Merchant>> {
        self.client.get(endpoints::merchants_by_category(category_id)).await
    }

    /// Merchants owned by a user
    pub async fn by_owner(&self, owner_id: &str) -> Result<Vec<Merchant>> {
        self.client.get(endpoints::merchants_by_owner(owner_id)).await
    }
}

/// Access to `/api/MerchantCategory`
#[derive(Clone)]
pub struct MerchantCategoryService {
    client: Arc<ApiClient>,
}

impl MerchantCategoryService {
    /// Create a new merchant category service
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All merchant categories
    pub async fn list(&self) -> Result<Vec<MerchantCategory>> {
        self.client.get(endpoints::MERCHANT_CATEGORIES).await
    }

    /// A single merchant category
    pub async fn get(&self, id: &str) -> Result<MerchantCategory> {
        self.client.get(endpoints::merchant_category(id)).await
    }
}

/// Access to `/api/MenuCategory`
#[derive(Clone)]
pub struct MenuCategoryService {
    client: Arc<ApiClient>,
}

impl MenuCategoryService {
    /// Create a new menu category service
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All menu categories
    pub async fn list(&self) -> Result<Vec<MenuCategory>> {
        self.client.get(endpoints::MENU_CATEGORIES).await
    }
}
