//! Filter options selected on the browse screens
//!
//! [`FilterOptions`] is always replaced as a whole when the user applies
//! the filter sheet; there is no partial merge.

use api_client::Price;
use serde::{Deserialize, Serialize};

/// Price below which an item is "under 50k"
pub const PRICE_LOW_THRESHOLD: u64 = 50_000;

/// Price above which an item is "over 100k"
pub const PRICE_HIGH_THRESHOLD: u64 = 100_000;

/// Sort order of the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Keep the order the backend returned
    #[default]
    Popular,
    /// Nearest first; unknown distance last
    Distance,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Best rated first
    Rating,
}

/// Maximum distance from the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceFilter {
    /// Any distance
    #[default]
    #[serde(rename = "all")]
    All,
    /// Within 1 km
    #[serde(rename = "1km")]
    Within1Km,
    /// Within 3 km
    #[serde(rename = "3km")]
    Within3Km,
    /// Within 5 km
    #[serde(rename = "5km")]
    Within5Km,
}

impl DistanceFilter {
    /// Radius in kilometres, `None` for [`DistanceFilter::All`]
    pub fn max_km(&self) -> Option<f64> {
        match self {
            DistanceFilter::All => None,
            DistanceFilter::Within1Km => Some(1.0),
            DistanceFilter::Within3Km => Some(3.0),
            DistanceFilter::Within5Km => Some(5.0),
        }
    }
}

/// Price bracket, thresholds in thousands of currency units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    /// Any price
    #[default]
    #[serde(rename = "all")]
    All,
    /// Strictly below 50 000
    #[serde(rename = "under50")]
    Under50,
    /// 50 000 to 100 000, both ends included
    #[serde(rename = "50to100")]
    From50To100,
    /// Strictly above 100 000
    #[serde(rename = "over100")]
    Over100,
}

impl PriceRange {
    /// Whether a price falls inside the bracket
    pub fn contains(&self, price: Price) -> bool {
        let amount = price.amount();
        match self {
            PriceRange::All => true,
            PriceRange::Under50 => amount < PRICE_LOW_THRESHOLD,
            PriceRange::From50To100 => {
                (PRICE_LOW_THRESHOLD..=PRICE_HIGH_THRESHOLD).contains(&amount)
            }
            PriceRange::Over100 => amount > PRICE_HIGH_THRESHOLD,
        }
    }
}

/// The full set of filter sheet selections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    /// Sort order
    pub sort_by: SortBy,
    /// Distance radius
    pub distance: DistanceFilter,
    /// Price bracket
    pub price_range: PriceRange,
    /// Only show items that can be ordered now
    pub open_now: bool,
}

impl FilterOptions {
    /// Whether any selection differs from the defaults
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}
