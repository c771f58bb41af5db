//! Machine-readable failure taxonomy shared by all clients

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of failure reported to the caller alongside a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required credential or setting is missing
    ConfigurationError,
    /// The remote host could not be reached
    NetworkError,
    /// The request exceeded its deadline
    Timeout,
    /// The backend reports a temporary outage
    ServiceUnavailable,
    /// The backend rejected our credentials
    InvalidCredentials,
    /// A success response had an unexpected shape
    InvalidResponseFormat,
    /// The search completed but found nothing, fallback included
    NoResultsFound,
}

impl ErrorKind {
    /// Default localized message for this kind
    ///
    /// Never contains transport or provider details.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "⚙️ 서비스 설정을 확인해주세요.",
            Self::NetworkError => "📡 인터넷 연결을 확인해주세요.",
            Self::Timeout => "⏱️ 응답 시간이 초과되었어요. 다시 시도해주세요.",
            Self::ServiceUnavailable => "🔧 서버 점검 중이에요. 잠시만 기다려주세요!",
            Self::InvalidCredentials => "⚠️ API 키 설정을 확인해주세요.",
            Self::InvalidResponseFormat => {
                "죄송해요, 일시적으로 응답할 수 없어요. 잠시 후 다시 시도해 주세요. 🥺"
            },
            Self::NoResultsFound => "주변 가게를 찾을 수 없어요. 다른 위치에서 다시 시도해 주세요.",
        }
    }

    /// Whether a manual retry by the user has a reasonable chance to succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::ServiceUnavailable
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConfigurationError => "ConfigurationError",
            Self::NetworkError => "NetworkError",
            Self::Timeout => "Timeout",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::InvalidCredentials => "InvalidCredentials",
            Self::InvalidResponseFormat => "InvalidResponseFormat",
            Self::NoResultsFound => "NoResultsFound",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 7] = [
        ErrorKind::ConfigurationError,
        ErrorKind::NetworkError,
        ErrorKind::Timeout,
        ErrorKind::ServiceUnavailable,
        ErrorKind::InvalidCredentials,
        ErrorKind::InvalidResponseFormat,
        ErrorKind::NoResultsFound,
    ];

    #[test]
    fn every_kind_has_a_message() {
        for kind in ALL {
            assert!(!kind.user_message().is_empty(), "{kind} has no message");
        }
    }

    #[test]
    fn transient_kinds() {
        assert!(ErrorKind::NetworkError.is_transient());
        assert!(ErrorKind::Timeout.is_transient());
        assert!(ErrorKind::ServiceUnavailable.is_transient());
        assert!(!ErrorKind::InvalidCredentials.is_transient());
        assert!(!ErrorKind::NoResultsFound.is_transient());
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
