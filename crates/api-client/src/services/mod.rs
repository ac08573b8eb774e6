//! Typed services for the backend resources
//!
//! Each service is a thin wrapper over a shared [`ApiClient`](crate::ApiClient):
//! it names the endpoint, picks the wire model, and leaves error handling
//! (including any fallback data) to the caller.

mod auth;
mod catalog;
mod user;

pub use auth::AuthService;
pub use catalog::{MenuCategoryService, MenuItemService, MerchantCategoryService, MerchantService};
pub use user::UserService;
