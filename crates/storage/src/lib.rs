//! Storage layer for the food ordering client
//!
//! This crate provides the sled-backed key-value store and the token store
//! that the API client reads bearer credentials from.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod tokens;

pub use kv::{KvConfig, KvStore};
pub use tokens::{
    MemoryTokenStore, PersistentTokenStore, TokenData, TokenStore, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
