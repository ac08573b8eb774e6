//! Wire models for the ordering backend
//!
//! Decoding is deliberately lenient about representation: identifiers may
//! arrive as strings or numbers, prices as numbers or formatted strings such
//! as `"30.000đ"`. Everything is normalized here so the rest of the crate
//! only sees one canonical form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// Price
// =============================================================================

/// Price in whole currency units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    /// Parse a price by keeping only its digits
    ///
    /// `"30.000đ"` and `"30,000 VND"` both parse as 30 000. Returns `None`
    /// when the text contains no digits at all.
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        // Saturate absurd inputs instead of failing the whole payload.
        Some(Self(digits.parse().unwrap_or(u64::MAX)))
    }

    /// Raw amount
    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Formats with dot thousands separators and a đ suffix, e.g. `30.000đ`
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        write!(f, "{}đ", out)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Float(f64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => Price(0),
            Some(Raw::Int(amount)) => Price(amount),
            Some(Raw::Float(amount)) => Price(amount.max(0.0).round() as u64),
            Some(Raw::Text(text)) => Price::parse(&text).unwrap_or_else(|| {
                tracing::debug!(value = %text, "price without digits, treating as 0");
                Price(0)
            }),
        })
    }
}

// =============================================================================
// Lenient field decoders
// =============================================================================

mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    impl StringOrNumber {
        fn into_string(self) -> String {
            match self {
                StringOrNumber::Text(text) => text,
                StringOrNumber::Int(n) => n.to_string(),
                StringOrNumber::Float(n) => n.to_string(),
            }
        }
    }

    /// Identifier sent as either a string or a number
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(StringOrNumber::deserialize(deserializer)?.into_string())
    }

    /// Optional string-or-number field
    pub fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
    }
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Auth
// =============================================================================

/// Login request body
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token pair returned by login
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// New access token
    pub access_token: String,
    /// New refresh token
    pub refresh_token: String,
}

/// Refresh request body
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The expired access token
    pub access_token: String,
    /// The refresh token
    pub refresh_token: String,
}

/// Refresh response; the refresh token is only present when rotated
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// New access token
    pub access_token: String,
    /// Rotated refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Login name
    #[serde(default)]
    pub username: String,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Delivery address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Profile update; unset fields are left unchanged server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// New delivery address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New avatar image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

// =============================================================================
// Catalog resources
// =============================================================================

/// A dish sold by a merchant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item identifier
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Dish name
    pub name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price
    #[serde(default)]
    pub price: Price,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Owning merchant
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// Owning merchant's name, when the backend embeds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// Menu category
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Menu category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Whether the item can be ordered right now
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Average rating, 0.0 to 5.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Number of ratings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    /// Distance label (e.g. "1.2 km")
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

/// A restaurant or shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Merchant identifier
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Merchant name
    pub name: String,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Average rating, 0.0 to 5.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Number of ratings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    /// Merchant category
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Owning user
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Whether the merchant is currently open
    #[serde(default = "default_true")]
    pub is_open: bool,
    /// Distance label (e.g. "1.2 km")
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    /// Typical price of a meal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price: Option<Price>,
}

/// Grouping of merchants (e.g. "Rice", "Drinks")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantCategory {
    /// Category identifier
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Category name
    pub name: String,
    /// Icon or image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Grouping of menu items within menus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    /// Category identifier
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Category name
    pub name: String,
    /// Merchant the category belongs to, if scoped
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_parse_formatted() {
        assert_eq!(Price::parse("30.000đ"), Some(Price(30_000)));
        assert_eq!(Price::parse("120,000 VND"), Some(Price(120_000)));
        assert_eq!(Price::parse("free"), None);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price(30_000).to_string(), "30.000đ");
        assert_eq!(Price(1_250_000).to_string(), "1.250.000đ");
        assert_eq!(Price(500).to_string(), "500đ");
        assert_eq!(Price(0).to_string(), "0đ");
    }

    #[test]
    fn test_price_deserialize_variants() {
        let prices: Vec<Price> =
            serde_json::from_value(json!([45000, 45000.4, "45.000đ", "n/a"])).unwrap();
        assert_eq!(prices, vec![Price(45_000), Price(45_000), Price(45_000), Price(0)]);
    }

    #[test]
    fn test_null_price_does_not_fail_the_list() {
        let items: Vec<MenuItem> = serde_json::from_value(json!([
            {"id": 1, "name": "Com tam", "price": null},
            {"id": 2, "name": "Pho bo", "price": "50.000đ"}
        ]))
        .unwrap();

        assert_eq!(items[0].price, Price(0));
        assert_eq!(items[1].price, Price(50_000));
    }

    #[test]
    fn test_menu_item_numeric_ids_and_defaults() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 12,
            "name": "Com tam",
            "price": "35.000đ",
            "merchantId": 3,
            "categoryId": "rice"
        }))
        .unwrap();

        assert_eq!(item.id, "12");
        assert_eq!(item.price, Price(35_000));
        assert_eq!(item.merchant_id.as_deref(), Some("3"));
        assert_eq!(item.category_id.as_deref(), Some("rice"));
        assert!(item.is_available);
        assert!(item.rating.is_none());
    }

    #[test]
    fn test_merchant_decoding() {
        let merchant: Merchant = serde_json::from_value(json!({
            "id": "m1",
            "name": "Pho 24",
            "rating": 4.6,
            "ratingCount": 120,
            "isOpen": false,
            "distance": 1.5
        }))
        .unwrap();

        assert_eq!(merchant.id, "m1");
        assert!(!merchant.is_open);
        assert_eq!(merchant.distance.as_deref(), Some("1.5"));
        assert_eq!(merchant.rating_count, Some(120));
    }

    #[test]
    fn test_refresh_response_without_rotation() {
        let response: RefreshResponse =
            serde_json::from_value(json!({"accessToken": "a2"})).unwrap();
        assert_eq!(response.access_token, "a2");
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn test_update_user_skips_unset_fields() {
        let update = UpdateUserRequest {
            full_name: Some("Nguyen An".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"fullName": "Nguyen An"}));
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest { username: "an".to_string(), password: "hunter2".to_string() };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }
}
