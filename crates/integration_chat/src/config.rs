//! Chat backend configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which named chat service endpoint is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveService {
    /// Main deployment
    #[default]
    Primary,
    /// Second deployment
    Secondary,
    /// Self-hosted workstation server
    Workstation,
}

impl fmt::Display for ActiveService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Workstation => "workstation",
        })
    }
}

impl FromStr for ActiveService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "workstation" => Ok(Self::Workstation),
            other => Err(format!("unknown chat service: {other}")),
        }
    }
}

/// Which wire protocol the chat backend speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// `POST /chat` recommendation service
    #[default]
    Cloud,
    /// OpenAI-compatible `/v1/chat/completions`
    OpenaiCompatible,
}

/// Named chat service URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    /// Main deployment
    #[serde(default = "default_primary_url")]
    pub primary: String,

    /// Second deployment
    #[serde(default = "default_secondary_url")]
    pub secondary: String,

    /// Workstation server, usually a tunnel URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workstation: Option<String>,
}

fn default_primary_url() -> String {
    "https://nabiyam-chatbot-web-816056347823.asia-northeast3.run.app".to_string()
}

fn default_secondary_url() -> String {
    "https://nabiyam-webapp-v2-816056347823.asia-northeast3.run.app".to_string()
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            primary: default_primary_url(),
            secondary: default_secondary_url(),
            workstation: None,
        }
    }
}

/// Settings for an OpenAI-compatible backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiCompatConfig {
    /// Server root; `/v1/chat/completions` is appended
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Reply length limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Presence penalty
    #[serde(default = "default_penalty")]
    pub presence_penalty: f32,

    /// Frequency penalty
    #[serde(default = "default_penalty")]
    pub frequency_penalty: f32,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

const fn default_max_tokens() -> u32 {
    300
}

const fn default_temperature() -> f32 {
    0.8
}

const fn default_penalty() -> f32 {
    0.1
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            presence_penalty: default_penalty(),
            frequency_penalty: default_penalty(),
        }
    }
}

impl OpenAiCompatConfig {
    /// The API key if one is set and not blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Configuration for the chat client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Wire protocol of the backend
    #[serde(default)]
    pub backend: BackendKind,

    /// Named service URLs
    #[serde(default)]
    pub services: ServiceEndpoints,

    /// Which named service to use
    #[serde(default)]
    pub active_service: ActiveService,

    /// Explicit URL that overrides the named services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Health check timeout in seconds
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// User identifier sent with every message
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// OpenAI-compatible backend settings
    #[serde(default)]
    pub openai: OpenAiCompatConfig,
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_health_timeout_secs() -> u64 {
    5
}

fn default_user_id() -> String {
    "mobile_user".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            services: ServiceEndpoints::default(),
            active_service: ActiveService::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            user_id: default_user_id(),
            openai: OpenAiCompatConfig::default(),
        }
    }
}

impl ChatConfig {
    /// Create a configuration for testing against a local server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: Some(base_url.to_string()),
            timeout_secs: 5,
            health_timeout_secs: 2,
            openai: OpenAiCompatConfig {
                base_url: base_url.to_string(),
                api_key: Some("sk-test".to_string()),
                ..OpenAiCompatConfig::default()
            },
            ..Default::default()
        }
    }

    /// URL of the chat service that will be called
    ///
    /// A non-blank `base_url` wins; otherwise the active named service is
    /// used, and an unset workstation URL falls back to primary.
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        if let Some(url) = non_blank(self.base_url.as_deref()) {
            return url.trim_end_matches('/');
        }

        let url = match self.active_service {
            ActiveService::Primary => self.services.primary.as_str(),
            ActiveService::Secondary => self.services.secondary.as_str(),
            ActiveService::Workstation => non_blank(self.services.workstation.as_deref())
                .unwrap_or(self.services.primary.as_str()),
        };
        url.trim().trim_end_matches('/')
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 || self.health_timeout_secs == 0 {
            return Err("timeout_secs and health_timeout_secs must be greater than 0".to_string());
        }

        if self.user_id.trim().is_empty() {
            return Err("user_id must not be empty".to_string());
        }

        match self.backend {
            BackendKind::Cloud => {
                let url = self.resolved_base_url();
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(format!("chat service URL must be http(s): '{url}'"));
                }
            },
            BackendKind::OpenaiCompatible => {
                if self.openai.base_url.trim().is_empty() {
                    return Err("openai.base_url must not be empty".to_string());
                }
                if self.openai.max_tokens == 0 {
                    return Err("openai.max_tokens must be greater than 0".to_string());
                }
            },
        }

        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
