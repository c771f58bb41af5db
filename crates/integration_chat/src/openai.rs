//! Client for OpenAI-compatible chat completion servers
//!
//! Works against api.openai.com as well as self-hosted servers exposing
//! the same `/v1/chat/completions` API.

use async_trait::async_trait;
use domain::ChatRequest;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::backend::{BackendReply, ChatBackend};
use crate::cloud::build_client;
use crate::config::{ChatConfig, OpenAiCompatConfig};
use crate::context::system_prompt;
use crate::error::ChatError;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// OpenAI-compatible chat completions client
#[derive(Debug)]
pub struct OpenAiCompatibleClient {
    client: Client,
    health_client: Client,
    root_url: String,
    settings: OpenAiCompatConfig,
    timeout_secs: u64,
}

impl OpenAiCompatibleClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `ChatError::ConfigurationError` if the configuration is
    /// invalid or an HTTP client cannot be built.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        if config.openai.base_url.trim().is_empty() {
            return Err(ChatError::ConfigurationError(
                "openai.base_url must not be empty".to_string(),
            ));
        }

        // Accept both the server root and the full completions URL
        let root_url = config
            .openai
            .base_url
            .trim()
            .trim_end_matches('/')
            .trim_end_matches(COMPLETIONS_PATH)
            .to_string();

        Ok(Self {
            client: build_client(config.timeout_secs)?,
            health_client: build_client(config.health_timeout_secs)?,
            root_url,
            settings: config.openai.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// URL completions are posted to
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}{COMPLETIONS_PATH}", self.root_url)
    }

    fn build_body<'a>(&'a self, request: &'a ChatRequest) -> CompletionBody<'a> {
        CompletionBody {
            model: &self.settings.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: system_prompt(request.category()),
                },
                CompletionMessage {
                    role: "user",
                    content: request.message().to_string(),
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            presence_penalty: self.settings.presence_penalty,
            frequency_penalty: self.settings.frequency_penalty,
        }
    }

    fn parse_reply(body: &str) -> Result<BackendReply, ChatError> {
        let raw: RawCompletion =
            serde_json::from_str(body).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let text = raw
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ChatError::InvalidResponse("no choices[0].message.content".to_string()))?;

        Ok(BackendReply {
            text,
            recommendations: Vec::new(),
            usage: raw.usage,
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAiCompatibleClient {
    #[instrument(skip(self, request), fields(model = %self.settings.model, category = ?request.category()))]
    async fn send(&self, request: &ChatRequest) -> Result<BackendReply, ChatError> {
        let mut builder = self
            .client
            .post(self.completions_url())
            .json(&self.build_body(request));

        if let Some(key) = self.settings.api_key() {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, %detail, "Completion request failed");
            return Err(ChatError::from_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::from_transport(&e, self.timeout_secs))?;

        let reply = Self::parse_reply(&body)?;
        debug!(reply_len = reply.text.len(), "Completion received");
        Ok(reply)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.root_url);
        self.health_client
            .get(&url)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    fn backend_name(&self) -> &'static str {
        "openai_compatible"
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage>,
    max_tokens: u32,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawCompletion {
    #[serde(default)]
    choices: Vec<RawChoice>,
    usage: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawChoice {
    message: Option<RawChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct RawChoiceMessage {
    content: Option<String>,
}
