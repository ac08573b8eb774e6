//! Error types for API operations

use serde::Deserialize;

/// Error returned by every API call
///
/// A handled 401 never reaches the caller as long as the refresh succeeds;
/// everything else carries enough information for the call site to decide
/// whether to show an inline error, retry, or substitute fallback data.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the server, or the raw body
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The token store failed to read or write credentials
    #[error("Token store error: {0}")]
    TokenStore(#[from] storage::StorageError),

    /// The client could not be constructed from its configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a status error
    pub fn status_error(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    /// HTTP status carried by the error, if the server responded
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is an authorization failure (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the requested resource does not exist (404)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the failure happened below HTTP, or is a transient gateway status
    pub fn is_network_error(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => matches!(status, 408 | 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Error body shapes the backend is known to return
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "title", alias = "error")]
    message: Option<String>,
}

/// Build a status error from a raw response body
pub(crate) fn from_response(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body);
            if text.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                text.into_owned()
            }
        });

    ApiError::Status { status, message }
}
