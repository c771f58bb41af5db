//! Application configuration
//!
//! Sources, lowest precedence first:
//! - built-in defaults of each section
//! - `yammi.toml` (or an explicit file)
//! - `YAMMI_`-prefixed environment variables, `__` between nesting levels
//!   (e.g. `YAMMI_POI__API_KEY`, `YAMMI_CHAT__ACTIVE_SERVICE`)
//! - the mobile app's legacy `EXPO_PUBLIC_*` variables, only for values
//!   still unset

use std::path::Path;

use integration_chat::{ChatConfig, OpenAiCompatConfig};
use integration_poi::PoiConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::telemetry::TelemetryConfig;

/// Default configuration file name, without extension
pub const DEFAULT_CONFIG_FILE: &str = "yammi";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "YAMMI";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A section failed validation
    #[error("Invalid [{section}] configuration: {message}")]
    Invalid {
        /// Section name
        section: &'static str,
        /// Validation message
        message: String,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Nearby restaurant search
    #[serde(default)]
    pub poi: PoiConfig,

    /// Chat backend
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging
    #[serde(default)]
    pub logging: TelemetryConfig,
}

impl AppConfig {
    /// Load from `yammi.toml` in the working directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load from an explicit file (or the default one) and the environment
    ///
    /// An explicit file must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_env(|name| std::env::var(name).ok());
        config.validate()?;

        info!(
            chat_backend = ?config.chat.backend,
            chat_service = %config.chat.active_service,
            poi_key_set = config.poi.api_key().is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Fill unset values from the mobile app's `EXPO_PUBLIC_*` variables
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.poi.api_key().is_none() {
            if let Some(key) = lookup("EXPO_PUBLIC_TMAP_API_KEY") {
                debug!("Using TMAP key from EXPO_PUBLIC_TMAP_API_KEY");
                self.poi.api_key = Some(key);
            }
        }

        if self.chat.base_url.is_none() {
            self.chat.base_url = lookup("EXPO_PUBLIC_API_URL");
        }

        if self.chat.services.workstation.is_none() {
            self.chat.services.workstation = lookup("EXPO_PUBLIC_WORKSTATION_URL");
        }

        if self.chat.openai.api_key().is_none() {
            if let Some(key) = lookup("EXPO_PUBLIC_OPENAI_API_KEY") {
                self.chat.openai.api_key = Some(key);
            }
        }

        if let Some(url) = lookup("EXPO_PUBLIC_OPENAI_BASE_URL") {
            if self.chat.openai.base_url == OpenAiCompatConfig::default().base_url {
                self.chat.openai.base_url = url;
            }
        }
    }

    /// Validate every section
    ///
    /// A missing TMAP key is not an error here; it surfaces when a search
    /// client is built so that chat-only use keeps working.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.poi
            .validate()
            .map_err(|message| ConfigError::Invalid {
                section: "poi",
                message,
            })?;
        self.chat
            .validate()
            .map_err(|message| ConfigError::Invalid {
                section: "chat",
                message,
            })?;
        Ok(())
    }
}
