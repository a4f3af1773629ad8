//! Error types for the rategate library.

use thiserror::Error;

/// Main error type for rate limiting operations.
#[derive(Error, Debug)]
pub enum RategateError {
    /// The limit window is open and the limiter is configured to raise
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Username key derivation requires an identity resolver
    #[error("No identity resolver is registered, required by username key mode")]
    MissingResolver,

    /// Denial was delegated but no handler is registered
    #[error("No denial handler is registered")]
    MissingDenialHandler,

    /// The default denial handler was invoked without a request context
    #[error("No request context was supplied to the denial handler")]
    MissingRequestContext,

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Store(#[from] redis::RedisError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rategate operations.
pub type Result<T> = std::result::Result<T, RategateError>;
