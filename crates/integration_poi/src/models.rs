//! POI search models

use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// One "search around a point" request for a single keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiSearchRequest {
    /// Search keyword (e.g. "맛집", "치킨")
    pub keyword: String,
    /// Search center
    pub center: GeoLocation,
    /// Search radius in meters
    pub radius_m: u32,
    /// Maximum number of POIs the provider should return
    pub count: u32,
}

impl PoiSearchRequest {
    /// Create a new request
    #[must_use]
    pub fn new(keyword: impl Into<String>, center: GeoLocation, radius_m: u32, count: u32) -> Self {
        Self {
            keyword: keyword.into(),
            center,
            radius_m,
            count,
        }
    }
}

/// A point of interest normalized from the provider's response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Provider identifier
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Assembled address line
    pub address: String,
    /// Position of the POI
    pub location: GeoLocation,
    /// Telephone number
    pub phone: Option<String>,
    /// Business category hint from the provider, e.g. "음식점 치킨"
    pub business_hint: String,
}
