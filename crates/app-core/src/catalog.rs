//! Catalog items shown on the browse screens
//!
//! A [`CatalogItem`] is the screen-facing view of either a menu item or a
//! merchant. Items are immutable once built and live as long as the screen
//! that fetched them.

use api_client::{MenuItem, Merchant, Price};
use serde::{Deserialize, Serialize};

/// One entry in a browsable list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Identifier, unique within one fetch
    pub id: String,
    /// Display title (dish or merchant name)
    pub title: String,
    /// Secondary line, usually the merchant name
    pub subtitle: String,
    /// Price in whole currency units
    pub price: Price,
    /// Average rating, 0.0 to 5.0
    pub rating: f32,
    /// Rating count as displayed (e.g. "120", "1k+")
    pub rating_count: String,
    /// Category tag used by the category filter
    pub category: String,
    /// Whether the item can be ordered right now
    pub available: bool,
    /// Image reference
    pub image: Option<String>,
    /// Distance label as received (e.g. "1.2 km")
    pub distance: Option<String>,
}

impl CatalogItem {
    /// Distance in kilometres, if the label can be parsed
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.as_deref().and_then(parse_distance_km)
    }

    /// Build an item from a menu item, using `merchant_name` as subtitle
    ///
    /// Falls back to the merchant name embedded in the menu item.
    pub fn from_menu_item(item: MenuItem, merchant_name: Option<&str>) -> Self {
        let subtitle = merchant_name
            .map(str::to_string)
            .or(item.merchant_name)
            .unwrap_or_default();

        Self {
            id: item.id,
            title: item.name,
            subtitle,
            price: item.price,
            rating: clamp_rating(item.rating),
            rating_count: format_rating_count(item.rating_count),
            category: item.category_id.or(item.category_name).unwrap_or_default(),
            available: item.is_available,
            image: item.image_url,
            distance: item.distance,
        }
    }
}

impl From<Merchant> for CatalogItem {
    fn from(merchant: Merchant) -> Self {
        Self {
            id: merchant.id,
            title: merchant.name,
            subtitle: merchant.address.unwrap_or_default(),
            price: merchant.average_price.unwrap_or_default(),
            rating: clamp_rating(merchant.rating),
            rating_count: format_rating_count(merchant.rating_count),
            category: merchant.category_id.unwrap_or_default(),
            available: merchant.is_open,
            image: merchant.image_url,
            distance: merchant.distance,
        }
    }
}

fn clamp_rating(rating: Option<f32>) -> f32 {
    rating.filter(|r| r.is_finite()).unwrap_or(0.0).clamp(0.0, 5.0)
}

/// Format a rating count the way list cells show it
pub fn format_rating_count(count: Option<u32>) -> String {
    match count {
        None => String::new(),
        Some(n) if n >= 1000 => format!("{}k+", n / 1000),
        Some(n) => n.to_string(),
    }
}

/// Parse a distance label such as `"1.2 km"`, `"1,2km"`, `"800 m"` or `"3"`
///
/// Bare numbers are kilometres. Returns `None` for anything else.
pub fn parse_distance_km(label: &str) -> Option<f64> {
    let normalized = label.trim().to_lowercase().replace(',', ".");
    let split = normalized
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(normalized.len());
    let (number, unit) = normalized.split_at(split);

    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    match unit.trim() {
        "" | "km" => Some(value),
        "m" => Some(value / 1000.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance_km("1.2 km"), Some(1.2));
        assert_eq!(parse_distance_km("1,5km"), Some(1.5));
        assert_eq!(parse_distance_km("800 m"), Some(0.8));
        assert_eq!(parse_distance_km("3"), Some(3.0));
        assert_eq!(parse_distance_km("far away"), None);
        assert_eq!(parse_distance_km(""), None);
        assert_eq!(parse_distance_km("2 miles"), None);
    }

    #[test]
    fn test_format_rating_count() {
        assert_eq!(format_rating_count(None), "");
        assert_eq!(format_rating_count(Some(87)), "87");
        assert_eq!(format_rating_count(Some(2400)), "2k+");
    }

    #[test]
    fn test_from_menu_item() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 5,
            "name": "Banh mi",
            "price": "25.000đ",
            "merchantName": "Banh Mi Huynh Hoa",
            "categoryId": 2,
            "rating": 4.7,
            "ratingCount": 1500
        }))
        .unwrap();

        let catalog = CatalogItem::from_menu_item(item.clone(), None);
        assert_eq!(catalog.id, "5");
        assert_eq!(catalog.title, "Banh mi");
        assert_eq!(catalog.subtitle, "Banh Mi Huynh Hoa");
        assert_eq!(catalog.price, Price(25_000));
        assert_eq!(catalog.category, "2");
        assert_eq!(catalog.rating_count, "1k+");
        assert!(catalog.available);

        let catalog = CatalogItem::from_menu_item(item, Some("Other Shop"));
        assert_eq!(catalog.subtitle, "Other Shop");
    }

    #[test]
    fn test_from_merchant() {
        let merchant: Merchant = serde_json::from_value(json!({
            "id": "m1",
            "name": "Pho Thin",
            "address": "13 Lo Duc",
            "rating": 7.5,
            "isOpen": false,
            "distance": "2.4 km",
            "categoryId": "noodles"
        }))
        .unwrap();

        let catalog = CatalogItem::from(merchant);
        assert_eq!(catalog.title, "Pho Thin");
        assert_eq!(catalog.subtitle, "13 Lo Duc");
        assert_eq!(catalog.rating, 5.0);
        assert!(!catalog.available);
        assert_eq!(catalog.distance_km(), Some(2.4));
        assert_eq!(catalog.category, "noodles");
    }
}
