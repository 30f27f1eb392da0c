//! Error types for meetmind

use thiserror::Error;

/// Result type alias using meetmind's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for meetmind
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// OpenRouter API error
    #[error("OpenRouter API error: {0}")]
    OpenRouter(String),

    /// Embedding model error
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    Index(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MessagePack encoding error
    #[error("Encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack decoding error
    #[error("Decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::RateLimit(_) | Error::Timeout(_)
        )
    }

    /// Check if error is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::Unauthorized(_))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::RateLimit("slow down".into()).is_retryable());
        assert!(Error::Timeout("30s".into()).is_retryable());
        assert!(!Error::Unauthorized("bad key".into()).is_retryable());
        assert!(!Error::OpenRouter("500".into()).is_retryable());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::InvalidInput("empty".into()).is_client_error());
        assert!(!Error::Internal("boom".into()).is_client_error());
    }
}
