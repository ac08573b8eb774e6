//! Core catalog logic for the food ordering client
//!
//! This crate turns what the API returns into what the browse screens show:
//! catalog items, the filter sheet, the search/filter/sort/paginate pipeline,
//! per-screen browse state and the fallback policy for catalog fetches.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod browser;
pub mod catalog;
pub mod fallback;
pub mod filters;
pub mod loader;
pub mod pipeline;

pub use browser::CatalogBrowser;
pub use catalog::CatalogItem;
pub use fallback::{DataSource, FallbackCatalog, Loaded};
pub use filters::{DistanceFilter, FilterOptions, PriceRange, SortBy};
pub use loader::CatalogLoader;
pub use pipeline::{compute_visible_page, CatalogPage, ITEMS_PER_PAGE};

use api_client::ApiError;
use thiserror::Error;

/// Errors raised while loading catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The API call failed and no fallback applies
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
