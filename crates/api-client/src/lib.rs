//! REST client for the food ordering backend
//!
//! This crate provides the authenticated [`ApiClient`] with its
//! refresh-and-retry cycle, the wire models, and one typed service per
//! backend resource.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod request;
pub mod services;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use models::{MenuCategory, MenuItem, Merchant, MerchantCategory, Price, User};
pub use request::{ApiRequest, ApiResponse, HttpMethod, RawResponse};
pub use services::{
    AuthService, MenuCategoryService, MenuItemService, MerchantCategoryService, MerchantService,
    UserService,
};
pub use transport::{ReqwestTransport, Transport};

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
