//! Chat backend trait

use async_trait::async_trait;
use domain::ChatRequest;
use serde_json::Value;

use crate::ChatError;

/// Reply text plus whatever structured data the backend attached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendReply {
    /// Non-empty reply text
    pub text: String,
    /// Structured recommendations, empty if none were sent
    pub recommendations: Vec<Value>,
    /// Opaque token usage or billing data
    pub usage: Option<Value>,
}

impl BackendReply {
    /// Reply with text only
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Trait for chat backends
///
/// Implemented by [`crate::CloudChatClient`] and
/// [`crate::OpenAiCompatibleClient`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message and return the backend's reply
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// success response without reply text.
    async fn send(&self, request: &ChatRequest) -> Result<BackendReply, ChatError>;

    /// Check if the backend answers its health endpoint
    async fn is_healthy(&self) -> bool;

    /// Get the backend name (e.g., "cloud")
    fn backend_name(&self) -> &'static str;
}
