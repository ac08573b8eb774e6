//! Backend endpoint paths

/// Login with username and password
pub const AUTH_LOGIN: &str = "/api/Auth/login";
/// Exchange a refresh token for a new access token
pub const AUTH_REFRESH: &str = "/api/Auth/refresh";
/// Invalidate the current session server-side
pub const AUTH_LOGOUT: &str = "/api/Auth/logout";

/// Current user profile (GET, PUT)
pub const USER: &str = "/api/User";

/// All menu items
pub const MENU_ITEMS: &str = "/api/MenuItem";
/// All merchants
pub const MERCHANTS: &str = "/api/Merchant";
/// All merchant categories
pub const MERCHANT_CATEGORIES: &str = "/api/MerchantCategory";
/// All menu categories
pub const MENU_CATEGORIES: &str = "/api/MenuCategory";

/// A single menu item
pub fn menu_item(id: &str) -> String {
    format!("{}/{}", MENU_ITEMS, segment(id))
}

/// Menu items sold by a merchant
pub fn menu_items_by_merchant(merchant_id: &str) -> String {
    format!("{}/merchant/{}", MENU_ITEMS, segment(merchant_id))
}

/// Menu items in a menu category
pub fn menu_items_by_category(category_id: &str) -> String {
    format!("{}/category/{}", MENU_ITEMS, segment(category_id))
}

/// A single merchant
pub fn merchant(id: &str) -> String {
    format!("{}/{}", MERCHANTS, segment(id))
}

/// Merchants in a merchant category
pub fn merchants_by_category(category_id: &str) -> String {
    format!("{}/category/{}", MERCHANTS, segment(category_id))
}

/// Merchants owned by a user
pub fn merchants_by_owner(owner_id: &str) -> String {
    format!("{}/owner/{}", MERCHANTS, segment(owner_id))
}

/// A single merchant category
pub fn merchant_category(id: &str) -> String {
    format!("{}/{}", MERCHANT_CATEGORIES, segment(id))
}

/// Percent-encode one path segment so ids cannot add segments or a query
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
