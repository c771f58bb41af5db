//! POI search configuration

use serde::{Deserialize, Serialize};

use crate::search::SearchStrategy;

/// Configuration for the TMAP POI search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiConfig {
    /// TMAP application key, sent as the `appKey` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL for the TMAP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Search tiers, tried in order until one yields stores
    #[serde(default = "default_strategies")]
    pub strategies: Vec<SearchStrategy>,
}

fn default_base_url() -> String {
    "https://apis.openapi.sk.com/tmap".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_strategies() -> Vec<SearchStrategy> {
    vec![SearchStrategy::primary(), SearchStrategy::fallback()]
}

impl Default for PoiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            strategies: default_strategies(),
        }
    }
}

impl PoiConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-app-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// The API key if one is set and not blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.strategies.is_empty() {
            return Err("at least one search strategy is required".to_string());
        }

        for strategy in &self.strategies {
            strategy.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoiConfig::default();
        assert_eq!(config.base_url, "https://apis.openapi.sk.com/tmap");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_key().is_none());
        assert_eq!(config.strategies.len(), 2);
        assert_eq!(config.strategies[0].name, "primary");
        assert_eq!(config.strategies[1].name, "fallback");
    }

    #[test]
    fn test_testing_config() {
        let config = PoiConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_key(), Some("test-app-key"));
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = PoiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_validation_success() {
        assert!(PoiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = PoiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_no_strategies() {
        let config = PoiConfig {
            strategies: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PoiConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key(), Some("k"));
        assert_eq!(config.strategies.len(), 2);
    }

    #[test]
    fn test_serialization_skips_missing_key() {
        let json = serde_json::to_string(&PoiConfig::default()).unwrap();
        assert!(!json.contains("api_key"));
    }
}
