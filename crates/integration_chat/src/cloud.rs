//! Client for the hosted recommendation service
//!
//! Speaks the service's own protocol: `POST {base}/chat` with the message
//! and category context, `GET {base}/health` for liveness.

use std::time::Duration;

use async_trait::async_trait;
use domain::{ChatRequest, MealCategory};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::backend::{BackendReply, ChatBackend};
use crate::config::ChatConfig;
use crate::context::category_context;
use crate::error::ChatError;

/// Client for the `/chat` recommendation service
#[derive(Debug)]
pub struct CloudChatClient {
    client: Client,
    health_client: Client,
    base_url: String,
    user_id: String,
    timeout_secs: u64,
}

impl CloudChatClient {
    /// Create a new client for the configured service
    ///
    /// # Errors
    ///
    /// Returns `ChatError::ConfigurationError` if the configuration is
    /// invalid or an HTTP client cannot be built.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        config.validate().map_err(ChatError::ConfigurationError)?;

        let client = build_client(config.timeout_secs)?;
        let health_client = build_client(config.health_timeout_secs)?;

        Ok(Self {
            client,
            health_client,
            base_url: config.resolved_base_url().to_string(),
            user_id: config.user_id.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// The service URL requests go to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extract the reply from a success body
    ///
    /// The text is taken from `response`, then `message`; a body with
    /// neither is an invalid response.
    fn parse_reply(body: &str) -> Result<BackendReply, ChatError> {
        let raw: RawChatReply =
            serde_json::from_str(body).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let text = [raw.response, raw.message]
            .into_iter()
            .flatten()
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or_else(|| {
                ChatError::InvalidResponse("reply has neither 'response' nor 'message'".to_string())
            })?;

        let recommendations = match raw.recommendations {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        Ok(BackendReply {
            text,
            recommendations,
            usage: raw.usage,
        })
    }
}

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, ChatError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent("Yammi/0.1")
        .build()
        .map_err(|e| ChatError::ConfigurationError(e.to_string()))
}

#[async_trait]
impl ChatBackend for CloudChatClient {
    #[instrument(skip(self, request), fields(category = ?request.category(), url = %self.base_url))]
    async fn send(&self, request: &ChatRequest) -> Result<BackendReply, ChatError> {
        let body = CloudChatBody {
            message: request.message(),
            user_id: &self.user_id,
            session_id: format!("session_{}", Uuid::new_v4()),
            context: category_context(request.category()),
            category: request.category(),
        };

        debug!(session_id = %body.session_id, "Sending chat message");

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, %detail, "Chat service returned an error");
            return Err(ChatError::from_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::from_transport(&e, self.timeout_secs))?;

        let reply = Self::parse_reply(&body)?;
        debug!(
            reply_len = reply.text.len(),
            recommendations = reply.recommendations.len(),
            "Chat reply received"
        );
        Ok(reply)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.health_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Chat service health check failed");
                false
            },
        }
    }

    fn backend_name(&self) -> &'static str {
        "cloud"
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct CloudChatBody<'a> {
    message: &'a str,
    user_id: &'a str,
    session_id: String,
    context: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<MealCategory>,
}

#[derive(Debug, Deserialize)]
struct RawChatReply {
    response: Option<String>,
    message: Option<String>,
    recommendations: Option<Value>,
    usage: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CloudChatClient::new(&ChatConfig::for_testing("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.backend_name(), "cloud");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChatConfig {
            base_url: Some("not a url".to_string()),
            ..ChatConfig::default()
        };
        assert!(matches!(
            CloudChatClient::new(&config),
            Err(ChatError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_parse_response_field() {
        let reply = CloudChatClient::parse_reply(
            r#"{"response": " 오늘은 비빔밥 어때요? 🍚 ", "recommendations": [{"menu": "비빔밥"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.text, "오늘은 비빔밥 어때요? 🍚");
        assert_eq!(reply.recommendations.len(), 1);
        assert!(reply.usage.is_none());
    }

    #[test]
    fn test_parse_message_field() {
        let reply = CloudChatClient::parse_reply(r#"{"response": "", "message": "안녕!"}"#).unwrap();
        assert_eq!(reply.text, "안녕!");
        assert!(reply.recommendations.is_empty());
    }

    #[test]
    fn test_parse_non_array_recommendations_ignored() {
        let reply =
            CloudChatClient::parse_reply(r#"{"message": "hi", "recommendations": "none"}"#).unwrap();
        assert!(reply.recommendations.is_empty());
    }

    #[test]
    fn test_parse_empty_object() {
        assert!(matches!(
            CloudChatClient::parse_reply("{}"),
            Err(ChatError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_not_json() {
        let err = CloudChatClient::parse_reply("<html>").unwrap_err();
        assert_eq!(err.kind(), domain::ErrorKind::InvalidResponseFormat);
    }

    #[test]
    fn test_body_serialization() {
        let body = CloudChatBody {
            message: "뭐 먹지",
            user_id: "mobile_user",
            session_id: "session_1".to_string(),
            context: category_context(None),
            category: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["context"], "일반 음식 추천");
        assert!(json.get("category").is_none());
    }
}
