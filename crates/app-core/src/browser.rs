//! Browse state of a catalog screen
//!
//! [`CatalogBrowser`] owns the items a screen fetched together with the
//! search text, category, filters and current page. Changing the search
//! text, the category or the filters sends the user back to page 1; the
//! current page is always kept within `[1, max(1, total_pages)]`.

use crate::catalog::CatalogItem;
use crate::filters::FilterOptions;
use crate::pipeline::{self, CatalogPage};

/// Browse state for one screen
#[derive(Debug, Clone, Default)]
pub struct CatalogBrowser {
    items: Vec<CatalogItem>,
    search_query: String,
    category: Option<String>,
    filters: FilterOptions,
    current_page: usize,
}

impl CatalogBrowser {
    /// Create a browser over freshly fetched items
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items, current_page: 1, ..Default::default() }
    }

    /// Replace the items (e.g. after pull-to-refresh), keeping the selections
    pub fn set_items(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
        self.clamp_page();
    }

    /// All items, unfiltered
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Current search text
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current category, `None` for all categories
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Current filter options
    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    /// Current 1-indexed page
    pub fn current_page(&self) -> usize {
        self.current_page.max(1)
    }

    /// Update the search text; goes back to page 1 when it changed
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.search_query {
            self.search_query = query;
            self.current_page = 1;
        }
    }

    /// Select a category, or `None` for all; goes back to page 1 when it changed
    pub fn set_category(&mut self, category: Option<String>) {
        if category != self.category {
            self.category = category;
            self.current_page = 1;
        }
    }

    /// Replace the whole filter record; goes back to page 1 when it changed
    pub fn apply_filters(&mut self, filters: FilterOptions) {
        if filters != self.filters {
            self.filters = filters;
            self.current_page = 1;
        }
    }

    /// Restore default filters
    pub fn reset_filters(&mut self) {
        self.apply_filters(FilterOptions::default());
    }

    /// Jump to a page, clamped to the valid range; returns the page now shown
    pub fn set_page(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages().max(1));
        self.current_page
    }

    /// Go to the next page if there is one
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.current_page() + 1)
    }

    /// Go to the previous page if there is one
    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.current_page().saturating_sub(1))
    }

    /// Number of pages for the current selections
    pub fn total_pages(&self) -> usize {
        pipeline::total_pages(self.filtered_count())
    }

    /// The page to render
    pub fn visible_page(&self) -> CatalogPage<'_> {
        pipeline::compute_visible_page(
            &self.items,
            &self.search_query,
            self.category.as_deref(),
            &self.filters,
            self.current_page(),
        )
    }

    fn filtered_count(&self) -> usize {
        pipeline::filter_and_sort(
            &self.items,
            &self.search_query,
            self.category.as_deref(),
            &self.filters,
        )
        .len()
    }

    fn clamp_page(&mut self) {
        let page = self.current_page();
        self.set_page(page);
    }
}
