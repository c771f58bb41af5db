//! Infrastructure layer - configuration loading and logging setup
//!
//! Aggregates the per-crate configuration sections into [`AppConfig`] and
//! installs the process-wide tracing subscriber.

pub mod config;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_logging};
