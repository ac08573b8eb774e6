//! Loading catalog lists for the browse screens

use crate::catalog::CatalogItem;
use crate::fallback::{with_fallback, FallbackCatalog, Loaded};
use crate::Result;
use api_client::{ApiClient, MenuItemService, Merchant, MerchantService};
use std::collections::HashMap;
use std::sync::Arc;

/// Fetches menu items and merchants and turns them into [`CatalogItem`]s
#[derive(Clone)]
pub struct CatalogLoader {
    menu_items: MenuItemService,
    merchants: MerchantService,
    fallback: FallbackCatalog<Merchant>,
}

impl CatalogLoader {
    /// Create a loader with no bundled merchants
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            menu_items: MenuItemService::new(client.clone()),
            merchants: MerchantService::new(client),
            fallback: FallbackCatalog::new(),
        }
    }

    /// Use `fallback` when a merchant list cannot be fetched
    pub fn with_fallback(mut self, fallback: FallbackCatalog<Merchant>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Menu items, optionally limited to a menu category
    ///
    /// Merchants are fetched alongside to fill in each item's subtitle. A
    /// failed merchant fetch only costs the subtitles.
    pub async fn load_menu_items(&self, category_id: Option<&str>) -> Result<Vec<CatalogItem>> {
        let items = async {
            match category_id {
                Some(id) => self.menu_items.by_category(id).await,
                None => self.menu_items.list().await,
            }
        };
        let (items, merchants) = tokio::join!(items, self.merchants.list());

        let names: HashMap<String, String> = match merchants {
            Ok(merchants) => merchants.into_iter().map(|m| (m.id, m.name)).collect(),
            Err(e) => {
                tracing::warn!("Failed to load merchant names: {}", e);
                HashMap::new()
            }
        };

        let items = items?;
        tracing::debug!("Loaded {} menu items", items.len());

        Ok(items
            .into_iter()
            .map(|item| {
                let name = item.merchant_id.as_ref().and_then(|id| names.get(id)).cloned();
                CatalogItem::from_menu_item(item, name.as_deref())
            })
            .collect())
    }

    /// Merchants, optionally limited to a merchant category
    ///
    /// Falls back to the bundled list for the category when the backend
    /// has nothing for it or cannot be reached.
    pub async fn load_merchants(
        &self,
        category_id: Option<&str>,
    ) -> Result<Loaded<Vec<CatalogItem>>> {
        let result = match category_id {
            Some(id) => self.merchants.by_category(id).await,
            None => self.merchants.list().await,
        };

        let loaded = with_fallback(result, || self.fallback.for_category(category_id))?;
        Ok(loaded.map(|merchants| merchants.into_iter().map(CatalogItem::from).collect()))
    }

    /// The menu of one merchant
    pub async fn load_menu(&self, merchant: &Merchant) -> Result<Vec<CatalogItem>> {
        let items = self.menu_items.by_merchant(&merchant.id).await?;
        Ok(items
            .into_iter()
            .map(|item| CatalogItem::from_menu_item(item, Some(&merchant.name)))
            .collect())
    }
}
