use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Passes the coordinate through when [`is_valid`](Self::is_valid) holds
    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(MapError::InvalidCoordinates(self.to_query_value()))
        }
    }

    /// Absolute per-axis difference in degrees: `(|Δlat|, |Δlng|)`
    pub fn axis_deltas(&self, other: &LatLng) -> (f64, f64) {
        ((self.lat - other.lat).abs(), (self.lng - other.lng).abs())
    }

    /// True when either axis moved strictly more than `threshold_deg`
    pub fn moved_beyond(&self, other: &LatLng, threshold_deg: f64) -> bool {
        let (d_lat, d_lng) = self.axis_deltas(other);
        d_lat > threshold_deg || d_lng > threshold_deg
    }

    /// Formats as the `lat,lng` pair most web APIs expect
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(30.2672, -97.7431);
        assert_eq!(coord.lat, 30.2672);
        assert_eq!(coord.lng, -97.7431);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_validated_rejects_out_of_range() {
        assert!(LatLng::new(-90.0, 180.0).validated().is_ok());
        let err = LatLng::new(30.0, 181.0).validated().unwrap_err();
        assert!(matches!(err, MapError::InvalidCoordinates(ref v) if v == "30,181"));
        assert!(LatLng::new(f64::NAN, 0.0).validated().is_err());
    }

    #[test]
    fn test_moved_beyond_is_strict_per_axis() {
        let origin = LatLng::new(30.0, -97.0);
        assert!(!origin.moved_beyond(&LatLng::new(30.004, -97.004), 0.005));
        assert!(origin.moved_beyond(&LatLng::new(30.006, -97.0), 0.005));
        assert!(origin.moved_beyond(&LatLng::new(30.0, -97.006), 0.005));
        assert!(!origin.moved_beyond(&LatLng::new(30.0, -97.0), 0.005));
    }

    #[test]
    fn test_query_value() {
        assert_eq!(LatLng::new(30.5, -97.25).to_query_value(), "30.5,-97.25");
    }
}
