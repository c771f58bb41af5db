//! Nearby store search result

use serde::{Deserialize, Serialize};

use crate::value_objects::StoreCategory;

/// A dining place found near the user
///
/// Built fresh for every search and discarded when a newer search
/// supersedes it. Within one result set `name` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    /// Store name, also the deduplication key
    pub name: String,

    /// Human-readable address
    pub address: String,

    /// Great-circle distance from the search center in kilometers
    pub distance_km: f64,

    /// Deep link that opens the store in a navigation app
    pub external_link: String,

    /// Classified category
    pub category: StoreCategory,

    /// Rating if the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Phone number if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Provider-specific identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StoreRecord {
    /// Create a record without the optional fields
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        distance_km: f64,
        external_link: impl Into<String>,
        category: StoreCategory,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            distance_km,
            external_link: external_link.into(),
            category,
            rating: None,
            phone: None,
            id: None,
        }
    }

    /// Set the phone number, ignoring blank values
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone.filter(|p| !p.trim().is_empty());
        self
    }

    /// Set the provider identifier, ignoring blank values
    #[must_use]
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id.filter(|i| !i.trim().is_empty());
        self
    }

    /// Set the rating
    #[must_use]
    pub const fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    /// Distance formatted for display, e.g. "350m" or "1.2km"
    #[must_use]
    pub fn distance_label(&self) -> String {
        format_distance_m(self.distance_km * 1000.0)
    }
}

/// Format a distance in meters for display
///
/// Below one kilometer the value is rounded to whole meters, above it is
/// shown in kilometers with one decimal.
#[must_use]
pub fn format_distance_m(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round())
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StoreRecord {
        StoreRecord::new(
            "BBQ치킨 시청점",
            "서울 중구 태평로1가",
            0.5,
            "tmap://search?name=BBQ&coordinate=37.57,126.98",
            StoreCategory::Chicken,
        )
    }

    #[test]
    fn builder_drops_blank_optionals() {
        let record = sample()
            .with_phone(Some("  ".to_string()))
            .with_id(Some(String::new()))
            .with_rating(Some(4.5));
        assert!(record.phone.is_none());
        assert!(record.id.is_none());
        assert_eq!(record.rating, Some(4.5));

        let record = sample()
            .with_phone(Some("02-123-4567".to_string()))
            .with_id(Some("1234".to_string()));
        assert_eq!(record.phone.as_deref(), Some("02-123-4567"));
        assert_eq!(record.id.as_deref(), Some("1234"));
    }

    #[test]
    fn distance_labels() {
        assert_eq!(sample().distance_label(), "500m");
        assert_eq!(format_distance_m(349.6), "350m");
        assert_eq!(format_distance_m(1000.0), "1.0km");
        assert_eq!(format_distance_m(1234.0), "1.2km");
    }

    #[test]
    fn serializes_camel_case_and_skips_missing() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["distanceKm"], 0.5);
        assert_eq!(json["category"], "치킨");
        assert!(json.get("externalLink").is_some());
        assert!(json.get("phone").is_none());
        assert!(json.get("rating").is_none());
    }
}
