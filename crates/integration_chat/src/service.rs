//! Chat service - turns backend results into user-displayable responses

use std::{fmt, sync::Arc, time::Instant};

use domain::{ChatRequest, ChatResponse, ErrorKind, MealCategory};
use tracing::{debug, error, info, instrument, warn};

use crate::backend::ChatBackend;
use crate::cloud::CloudChatClient;
use crate::config::{BackendKind, ChatConfig};
use crate::context::category_question;
use crate::error::ChatError;
use crate::openai::OpenAiCompatibleClient;

/// Service that never fails: every outcome becomes a [`ChatResponse`]
pub struct ChatService {
    backend: Arc<dyn ChatBackend>,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService")
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

impl ChatService {
    /// Create a service over an existing backend
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Build the backend selected by the configuration
    ///
    /// # Errors
    ///
    /// Returns `ChatError::ConfigurationError` if the backend cannot be built.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        let backend: Arc<dyn ChatBackend> = match config.backend {
            BackendKind::Cloud => Arc::new(CloudChatClient::new(config)?),
            BackendKind::OpenaiCompatible => Arc::new(OpenAiCompatibleClient::new(config)?),
        };
        info!(backend = backend.backend_name(), "Chat backend ready");
        Ok(Self::new(backend))
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Send a message and normalize the outcome
    #[instrument(skip(self, request), fields(category = ?request.category(), message_len = request.message().len()))]
    pub async fn send_message(&self, request: &ChatRequest) -> ChatResponse {
        let start = Instant::now();
        let category = request.category();

        match self.backend.send(request).await {
            Ok(reply) => {
                let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                debug!(latency_ms, "Chat reply ready");
                ChatResponse::success(reply.text, category)
                    .with_recommendations(reply.recommendations)
                    .with_usage(reply.usage)
            },
            Err(e) => {
                let kind = e.kind();
                if kind.is_transient() {
                    warn!(error = %e, %kind, "Chat request failed");
                } else {
                    error!(error = %e, %kind, "Chat request failed");
                }
                ChatResponse::failure_with_message(kind, e.user_message(), category)
            },
        }
    }

    /// Ask the canned question for a category
    pub async fn category_recommendation(&self, category: MealCategory) -> ChatResponse {
        match ChatRequest::new(category_question(category), Some(category)) {
            Ok(request) => self.send_message(&request).await,
            Err(e) => {
                error!(error = %e, %category, "Invalid canned question");
                ChatResponse::failure(ErrorKind::ConfigurationError, Some(category))
            },
        }
    }

    /// Whether the backend's health endpoint answers
    pub async fn check_health(&self) -> bool {
        let healthy = self.backend.is_healthy().await;
        if !healthy {
            warn!(backend = self.backend.backend_name(), "Chat backend is unhealthy");
        }
        healthy
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::function;

    use super::*;
    use crate::backend::BackendReply;

    mock! {
        pub Backend {}

        #[async_trait::async_trait]
        impl ChatBackend for Backend {
            async fn send(&self, request: &ChatRequest) -> Result<BackendReply, ChatError>;
            async fn is_healthy(&self) -> bool;
            fn backend_name(&self) -> &'static str;
        }
    }

    fn request(message: &str, category: Option<MealCategory>) -> ChatRequest {
        ChatRequest::new(message, category).unwrap()
    }

    #[test]
    fn service_debug_shows_backend() {
        let mut mock = MockBackend::new();
        mock.expect_backend_name().return_const("mock");
        let service = ChatService::new(Arc::new(mock));
        assert!(format!("{service:?}").contains("mock"));
    }

    #[tokio::test]
    async fn success_carries_payload() {
        let mut mock = MockBackend::new();
        mock.expect_send().returning(|_| {
            Ok(BackendReply {
                text: "카레라이스 어때요? 🍛".to_string(),
                recommendations: vec![serde_json::json!({"menu": "카레라이스"})],
                usage: Some(serde_json::json!({"total_tokens": 10})),
            })
        });

        let service = ChatService::new(Arc::new(mock));
        let response = service
            .send_message(&request("점심 추천", Some(MealCategory::Cost)))
            .await;

        assert!(response.success);
        assert_eq!(response.message, "카레라이스 어때요? 🍛");
        assert_eq!(response.category, Some(MealCategory::Cost));
        assert_eq!(response.recommendations.len(), 1);
        assert!(response.usage.is_some());
        assert!(response.error_kind.is_none());
    }

    #[tokio::test]
    async fn failure_is_normalized() {
        let mut mock = MockBackend::new();
        mock.expect_send()
            .returning(|_| Err(ChatError::ServiceUnavailable { status: 503 }));

        let service = ChatService::new(Arc::new(mock));
        let response = service.send_message(&request("안녕", None)).await;

        assert!(!response.success);
        assert_eq!(response.error_kind, Some(ErrorKind::ServiceUnavailable));
        assert_eq!(response.message, "🔧 서버 점검 중이에요. 잠시만 기다려주세요!");
    }

    #[tokio::test]
    async fn transport_details_stay_out_of_message() {
        let mut mock = MockBackend::new();
        mock.expect_send().returning(|_| {
            Err(ChatError::ConnectionFailed(
                "error sending request for url (http://10.1.2.3/chat)".to_string(),
            ))
        });

        let service = ChatService::new(Arc::new(mock));
        let response = service.send_message(&request("안녕", None)).await;

        assert_eq!(response.error_kind, Some(ErrorKind::NetworkError));
        assert!(!response.message.contains("10.1.2.3"));
        assert!(!response.message.is_empty());
    }

    #[tokio::test]
    async fn unexpected_status_uses_generic_apology() {
        let mut mock = MockBackend::new();
        mock.expect_send()
            .returning(|_| Err(ChatError::UnexpectedStatus { status: 500 }));

        let service = ChatService::new(Arc::new(mock));
        let response = service.send_message(&request("안녕", None)).await;

        assert_eq!(response.error_kind, Some(ErrorKind::ServiceUnavailable));
        assert!(response.message.starts_with("죄송해요"));
    }

    #[tokio::test]
    async fn category_recommendation_sends_canned_question() {
        let mut mock = MockBackend::new();
        mock.expect_send()
            .with(function(|r: &ChatRequest| {
                r.category() == Some(MealCategory::Allergy)
                    && r.message() == category_question(MealCategory::Allergy)
            }))
            .times(1)
            .returning(|_| Ok(BackendReply::text("우유 알레르기가 있나요? 🥛")));

        let service = ChatService::new(Arc::new(mock));
        let response = service.category_recommendation(MealCategory::Allergy).await;

        assert!(response.success);
        assert_eq!(response.category, Some(MealCategory::Allergy));
    }

    #[test]
    fn check_health_reports_backend_state() {
        let mut mock = MockBackend::new();
        mock.expect_is_healthy().returning(|| false);
        mock.expect_backend_name().return_const("mock");

        let service = ChatService::new(Arc::new(mock));
        assert!(!tokio_test::block_on(service.check_health()));
    }

    #[test]
    fn from_config_selects_backend() {
        let config = ChatConfig::for_testing("http://localhost:8080");
        let service = ChatService::from_config(&config).unwrap();
        assert_eq!(service.backend_name(), "cloud");

        let config = ChatConfig {
            backend: BackendKind::OpenaiCompatible,
            ..ChatConfig::for_testing("http://localhost:8080")
        };
        let service = ChatService::from_config(&config).unwrap();
        assert_eq!(service.backend_name(), "openai_compatible");
    }
}
