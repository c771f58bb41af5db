//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_KM: f64 = 6371.0;
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// NaN and infinite values fall outside both ranges and are rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a location from the string pair most map providers return
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either value is not a number or is out of range
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, InvalidCoordinates> {
        let lat = latitude.trim().parse().map_err(|_| InvalidCoordinates)?;
        let lon = longitude.trim().parse().map_err(|_| InvalidCoordinates)?;
        Self::new(lat, lon)
    }

    /// Create a location without validation (for trusted constants)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in kilometers
    ///
    /// Uses the Haversine formula with an Earth radius of 6371 km
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        EARTH_RADIUS_KM * self.central_angle(other)
    }

    /// Great-circle distance to another location in meters
    #[must_use]
    pub fn distance_m(&self, other: &Self) -> f64 {
        EARTH_RADIUS_M * self.central_angle(other)
    }

    fn central_angle(&self, other: &Self) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        )
        // rounding near antipodal points can push `a` just past 1.0
        .clamp(0.0, 1.0);
        2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Common locations for defaults
impl GeoLocation {
    /// Seoul City Hall, South Korea
    #[must_use]
    pub const fn seoul() -> Self {
        Self::new_unchecked(37.5665, 126.978)
    }

    /// Busan City Hall, South Korea
    #[must_use]
    pub const fn busan() -> Self {
        Self::new_unchecked(35.1796, 129.0756)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(37.5665, 126.978).expect("valid coordinates");
        assert!((loc.latitude() - 37.5665).abs() < f64::EPSILON);
        assert!((loc.longitude() - 126.978).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(GeoLocation::new(0.0, 181.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
        assert!(GeoLocation::new(f64::INFINITY, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_parse_strings() {
        let loc = GeoLocation::parse("37.5700", " 126.9820 ").expect("valid");
        assert!((loc.latitude() - 37.57).abs() < 1e-9);
        assert!((loc.longitude() - 126.982).abs() < 1e-9);

        assert!(GeoLocation::parse("", "126.9").is_err());
        assert!(GeoLocation::parse("abc", "126.9").is_err());
        assert!(GeoLocation::parse("NaN", "126.9").is_err());
        assert!(GeoLocation::parse("95.0", "126.9").is_err());
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::seoul();
        let display = format!("{loc}");
        assert!(display.contains("37.5665"));
        assert!(display.contains("126.978"));
    }

    #[test]
    fn test_distance_same_location() {
        let loc = GeoLocation::seoul();
        assert!(loc.distance_km(&loc).abs() < 1e-9);
        assert!(loc.distance_m(&loc).abs() < 1e-6);
    }

    #[test]
    fn test_distance_seoul_busan() {
        let distance = GeoLocation::seoul().distance_km(&GeoLocation::busan());
        // Seoul to Busan is roughly 325 km as the crow flies
        assert!((distance - 325.0).abs() < 10.0);
    }

    #[test]
    fn test_distance_units_agree() {
        let a = GeoLocation::seoul();
        let b = GeoLocation::new(37.5710, 126.9830).expect("valid");
        let km = a.distance_km(&b);
        let m = a.distance_m(&b);
        assert!((km * 1000.0 - m).abs() < 1e-6);
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::seoul();
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("37.5665"));

        let deserialized: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, deserialized);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let a = GeoLocation::new(lat1, lon1).unwrap();
            let b = GeoLocation::new(lat2, lon2).unwrap();
            prop_assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
        }

        #[test]
        fn self_distance_is_zero(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let a = GeoLocation::new(lat, lon).unwrap();
            prop_assert!(a.distance_km(&a).abs() < 1e-9);
        }

        #[test]
        fn distance_is_finite_and_bounded(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let a = GeoLocation::new(lat1, lon1).unwrap();
            let b = GeoLocation::new(lat2, lon2).unwrap();
            let d = a.distance_km(&b);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
            // Half the circumference is the upper bound
            prop_assert!(d <= std::f64::consts::PI * 6371.0 + 1e-6);
        }
    }
}
