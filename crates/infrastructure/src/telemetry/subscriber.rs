//! tracing-subscriber initialization

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directives (e.g., "warn", "integration_poi=debug")
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives could not be parsed
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// The rejected directives
        filter: String,
        /// Parser message
        message: String,
    },

    /// A global subscriber was already set
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Pick the effective filter directives
///
/// An explicit override (from `-v` flags) wins, then `RUST_LOG`, then the
/// configured filter.
pub(crate) fn resolve_filter(
    config: &TelemetryConfig,
    override_filter: Option<&str>,
    env_filter: Option<String>,
) -> String {
    override_filter
        .map(ToString::to_string)
        .or_else(|| env_filter.filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| config.filter.clone())
}

/// Parse filter directives into an `EnvFilter`
pub(crate) fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|e| TelemetryError::InvalidFilter {
        filter: directives.to_string(),
        message: e.to_string(),
    })
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so that command output on stdout stays machine-readable.
pub fn init_logging(
    config: &TelemetryConfig,
    override_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let directives = resolve_filter(
        config,
        override_filter,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    let env_filter = build_filter(&directives)?;

    let (pretty, json) = match config.format {
        LogFormat::Pretty => (
            Some(fmt::layer().with_writer(std::io::stderr).with_target(true)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(filter = %directives, format = ?config.format, "Logging initialized");
    Ok(())
}
