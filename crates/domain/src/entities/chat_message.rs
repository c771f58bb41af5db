//! Chat request and normalized chat response

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DomainError;
use crate::value_objects::{ErrorKind, MealCategory};

/// A user message bound for the chat backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    message: String,
    category: Option<MealCategory>,
}

impl ChatRequest {
    /// Create a request, trimming the message
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyMessage` if nothing is left after trimming.
    pub fn new(message: &str, category: Option<MealCategory>) -> Result<Self, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self {
            message: message.to_string(),
            category,
        })
    }

    /// The trimmed message text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Optional category tag
    #[must_use]
    pub const fn category(&self) -> Option<MealCategory> {
        self.category
    }
}

/// Uniform result of a chat call
///
/// `message` is always safe to show to the user. On failure it is a short
/// localized explanation and `error_kind` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Whether the backend produced a reply
    pub success: bool,

    /// Reply text or localized failure explanation
    pub message: String,

    /// Failure classification, set exactly when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    /// Category the request was tagged with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MealCategory>,

    /// Structured recommendations returned by the backend, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Value>,

    /// Opaque usage metadata returned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
}

impl ChatResponse {
    /// Successful reply
    #[must_use]
    pub fn success(message: impl Into<String>, category: Option<MealCategory>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_kind: None,
            category,
            recommendations: Vec::new(),
            usage: None,
        }
    }

    /// Failed call with the default message for `kind`
    #[must_use]
    pub fn failure(kind: ErrorKind, category: Option<MealCategory>) -> Self {
        Self::failure_with_message(kind, kind.user_message(), category)
    }

    /// Failed call with a custom user-facing message
    #[must_use]
    pub fn failure_with_message(
        kind: ErrorKind,
        message: impl Into<String>,
        category: Option<MealCategory>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_kind: Some(kind),
            category,
            recommendations: Vec::new(),
            usage: None,
        }
    }

    /// Attach backend recommendations
    #[must_use]
    pub fn with_recommendations(mut self, recommendations: Vec<Value>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Attach usage metadata
    #[must_use]
    pub fn with_usage(mut self, usage: Option<Value>) -> Self {
        self.usage = usage;
        self
    }
}
