//! POI provider trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{Poi, PoiError, PoiSearchRequest};

/// Trait for point-of-interest providers
///
/// Implemented by [`crate::TmapPoiClient`]; tests substitute a mock.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiProvider: Send + Sync {
    /// Search for POIs matching a keyword around a center point
    ///
    /// POIs with malformed coordinates are skipped, not reported as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the provider rejects
    /// it, or the response body is not the expected shape.
    async fn search_around(&self, request: &PoiSearchRequest) -> Result<Vec<Poi>, PoiError>;

    /// Check if the provider is reachable with the configured credentials
    async fn is_healthy(&self) -> bool;

    /// Get the provider name (e.g., "tmap")
    fn provider_name(&self) -> &'static str;
}
