//! # Error Types
//!
//! Typed error handling for the storefront backend.
//! Fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing secrets, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No bearer credential on a gated route
    #[error("Unauthorized: missing bearer credential")]
    Unauthorized,

    /// Credential failed signature or expiry verification
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Authenticated but not allowed (wrong user, missing admin role)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Document store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::Unauthorized => 401,
            ShopError::InvalidToken(_) => 403,
            ShopError::Forbidden(_) => 403,
            ShopError::Store(_) => 502,
            ShopError::ProviderError { .. } => 502,
            ShopError::NetworkError(_) => 503,
            ShopError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
