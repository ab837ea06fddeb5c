//! Error types for the product search sync service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Transport failures of a single HTTP call are [`ClientError`]s; the core components
//! surface [`ServiceError`]s, which carry the retry classification the trigger layer
//! and query callers rely on.

use thiserror::Error;

/// Errors that can occur on a single call to the index service or the primary store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

/// Errors surfaced by the index synchronizer and the federated query executor.
///
/// Missing optional record fields and index entries whose record has already been
/// removed from the store are deliberately absent here: the former are projected as
/// absent fields, the latter are dropped during hydration.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// An upsert, delete or search call to the index service failed.
    #[error("Search index unavailable: {0}")]
    IndexUnavailable(#[source] ClientError),

    /// A batch fetch from the primary store failed.
    #[error("Primary store unavailable: {0}")]
    StoreUnavailable(#[source] ClientError),

    /// The change event or request cannot be applied as delivered.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

impl ServiceError {
    /// Whether redelivering the event (or repeating the query) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IndexUnavailable(_) | Self::StoreUnavailable(_))
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IndexUnavailable(_) => "index_unavailable",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::InvalidEvent(_) => "invalid_event",
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
