//! Bundled fallback data for catalog screens
//!
//! When the backend has no data for a category, or cannot be reached, a
//! screen shows a bundled list instead of an error. The decision is made at
//! the call site that loads the list; the API client itself never substitutes
//! data.

use crate::Result;
use api_client::ApiError;
use std::collections::HashMap;

/// Where a loaded list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Fetched from the backend
    Remote,
    /// Taken from bundled fallback data
    Fallback,
}

/// A loaded value tagged with its source
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// The value
    pub data: T,
    /// Where it came from
    pub source: DataSource,
}

impl<T> Loaded<T> {
    /// Wrap a value fetched from the backend
    pub fn remote(data: T) -> Self {
        Self { data, source: DataSource::Remote }
    }

    /// Wrap a bundled value
    pub fn fallback(data: T) -> Self {
        Self { data, source: DataSource::Fallback }
    }

    /// Whether the value is bundled data
    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }

    /// Transform the value, keeping the source
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded { data: f(self.data), source: self.source }
    }
}

/// Whether an error should be answered with bundled data
///
/// Only "not found" and connectivity problems qualify. Authentication and
/// other server errors still reach the caller.
pub fn should_fall_back(error: &ApiError) -> bool {
    error.is_not_found() || error.is_network_error()
}

/// Resolve a fetch result, substituting `fallback` for qualifying errors
pub fn with_fallback<T>(
    result: std::result::Result<T, ApiError>,
    fallback: impl FnOnce() -> T,
) -> Result<Loaded<T>> {
    match result {
        Ok(data) => Ok(Loaded::remote(data)),
        Err(error) if should_fall_back(&error) => {
            tracing::warn!("Using fallback data: {}", error);
            Ok(Loaded::fallback(fallback()))
        }
        Err(error) => Err(error.into()),
    }
}

/// Bundled lists keyed by category id
#[derive(Debug, Clone)]
pub struct FallbackCatalog<T> {
    by_category: HashMap<String, Vec<T>>,
    default: Vec<T>,
}

impl<T> Default for FallbackCatalog<T> {
    fn default() -> Self {
        Self { by_category: HashMap::new(), default: Vec::new() }
    }
}

impl<T: Clone> FallbackCatalog<T> {
    /// Create an empty fallback catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list used when a category has no entry of its own
    pub fn with_default(mut self, items: Vec<T>) -> Self {
        self.default = items;
        self
    }

    /// Set the list for one category
    pub fn with_category(mut self, category_id: impl Into<String>, items: Vec<T>) -> Self {
        self.by_category.insert(category_id.into(), items);
        self
    }

    /// The bundled list for a category, or the default list
    pub fn for_category(&self, category_id: Option<&str>) -> Vec<T> {
        category_id
            .and_then(|id| self.by_category.get(id))
            .unwrap_or(&self.default)
            .clone()
    }
}
