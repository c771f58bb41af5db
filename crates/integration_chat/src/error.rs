//! Chat client error types

use domain::ErrorKind;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to a chat backend
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Backend answered 502 or 503
    #[error("Service unavailable: HTTP {status}")]
    ServiceUnavailable {
        /// HTTP status code
        status: u16,
    },

    /// Backend rejected the credentials
    #[error("Invalid credentials: HTTP {status}")]
    InvalidCredentials {
        /// HTTP status code
        status: u16,
    },

    /// Gateway or request timeout reported by the backend
    #[error("Upstream timeout: HTTP {status}")]
    UpstreamTimeout {
        /// HTTP status code
        status: u16,
    },

    /// Any other non-success status
    #[error("Unexpected status: HTTP {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// Success response without usable reply text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ChatError {
    /// Map a non-success HTTP status to an error
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        let code = status.as_u16();
        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                Self::ServiceUnavailable { status: code }
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::InvalidCredentials { status: code }
            },
            StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => {
                Self::UpstreamTimeout { status: code }
            },
            _ => Self::UnexpectedStatus { status: code },
        }
    }

    /// Map a transport error, distinguishing timeouts
    pub(crate) fn from_transport(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(error.to_string())
        }
    }

    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::ServiceUnavailable { .. }
                | Self::UpstreamTimeout { .. }
        )
    }

    /// Classify into the user-facing error taxonomy
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationError(_) => ErrorKind::ConfigurationError,
            Self::ConnectionFailed(_) => ErrorKind::NetworkError,
            Self::Timeout { .. } | Self::UpstreamTimeout { .. } => ErrorKind::Timeout,
            Self::ServiceUnavailable { .. } | Self::UnexpectedStatus { .. } => {
                ErrorKind::ServiceUnavailable
            },
            Self::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Self::InvalidResponse(_) => ErrorKind::InvalidResponseFormat,
        }
    }

    /// Localized message safe to show to the user
    ///
    /// Unexpected statuses get the generic apology instead of the
    /// maintenance notice.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::UnexpectedStatus { .. } => ErrorKind::InvalidResponseFormat.user_message(),
            other => other.kind().user_message(),
        }
    }
}
