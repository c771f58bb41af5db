//! POI search error types

use domain::ErrorKind;
use thiserror::Error;

const INVALID_QUERY_MESSAGE: &str = "🔍 검색어를 입력해주세요.";

/// Errors that can occur during POI search operations
#[derive(Debug, Error)]
pub enum PoiError {
    /// Missing or invalid client configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Connection to the POI provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Provider answered with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the POI provider
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Search keyword is empty
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// API key was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Provider is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Every search tier completed without a usable store
    #[error("No stores found near {center}")]
    NoResultsFound {
        /// Search center as "lat, lon"
        center: String,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl PoiError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Classify into the user-facing error taxonomy
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationError(_) | Self::InvalidQuery(_) => ErrorKind::ConfigurationError,
            Self::ConnectionFailed(_) => ErrorKind::NetworkError,
            Self::ParseError(_) => ErrorKind::InvalidResponseFormat,
            Self::AuthenticationFailed(_) => ErrorKind::InvalidCredentials,
            Self::RequestFailed(_)
            | Self::RateLimitExceeded { .. }
            | Self::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Self::NoResultsFound { .. } => ErrorKind::NoResultsFound,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    /// Localized message safe to show to the user
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => INVALID_QUERY_MESSAGE,
            _ => self.kind().user_message(),
        }
    }
}
