use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Longest possible great-circle distance (half the circumference).
pub const MAX_DISTANCE_KM: f64 = PI * EARTH_RADIUS_KM;

/// A labeled latitude/longitude pair in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            label: label.into(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_km(self, other)
    }

    /// Linear interpolation towards `other`, with `ratio` clamped to `0..=1`.
    ///
    /// A ratio of one yields exactly the coordinates of `other`.
    pub fn lerp(&self, other: &GeoPoint, ratio: f64, label: impl Into<String>) -> GeoPoint {
        let ratio = ratio.clamp(0.0, 1.0);
        if ratio >= 1.0 {
            return GeoPoint::new(other.lat, other.lng, label);
        }

        GeoPoint::new(
            self.lat + (other.lat - self.lat) * ratio,
            self.lng + (other.lng - self.lng) * ratio,
            label,
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Haversine distance between two points in kilometers.
///
/// Defined for finite coordinates only; non-finite input yields NaN.
pub fn distance_km(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let d_lat = (p2.lat - p1.lat).to_radians();
    let d_lng = (p2.lng - p1.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + p1.lat.to_radians().cos() * p2.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Travel time in hours for `distance_km` at a constant `speed_kmh`.
pub fn eta_hours(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / speed_kmh
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseGeoPointError {
    #[error("expected coordinates as `<lat>,<lng>`, got `{0}`")]
    Format(String),
    #[error("invalid coordinate `{0}`")]
    Number(String),
    #[error("latitude {0} is outside of -90..=90")]
    Latitude(f64),
    #[error("longitude {0} is outside of -180..=180")]
    Longitude(f64),
}

/// Parses `<lat>,<lng>` into an unlabeled point.
impl FromStr for GeoPoint {
    type Err = ParseGeoPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| ParseGeoPointError::Format(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseGeoPointError::Number(v.trim().to_string()))
        };
        let (lat, lng) = (parse(lat)?, parse(lng)?);

        if !(-90.0..=90.0).contains(&lat) {
            return Err(ParseGeoPointError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ParseGeoPointError::Longitude(lng));
        }

        Ok(GeoPoint::new(lat, lng, format!("{:.4}, {:.4}", lat, lng)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_york() -> GeoPoint {
        GeoPoint::new(40.7128, -74.0060, "New York")
    }

    fn los_angeles() -> GeoPoint {
        GeoPoint::new(34.0522, -118.2437, "Los Angeles")
    }

    #[test]
    fn same_point_is_zero() {
        let p = new_york();
        assert_eq!(distance_km(&p, &p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let (a, b) = (new_york(), los_angeles());
        assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
    }

    #[test]
    fn new_york_to_los_angeles() {
        let d = new_york().distance_to(&los_angeles());
        assert!((3935.0..=3945.0).contains(&d), "got {}", d);
    }

    #[test]
    fn antipodes_are_bounded() {
        let a = GeoPoint::new(0.0, 0.0, "a");
        let b = GeoPoint::new(0.0, 180.0, "b");
        let d = distance_km(&a, &b);
        assert!(d <= MAX_DISTANCE_KM + 1e-9);
        assert!((d - MAX_DISTANCE_KM).abs() < 1e-6);

        let poles = distance_km(&GeoPoint::new(90.0, 0.0, "n"), &GeoPoint::new(-90.0, 0.0, "s"));
        assert!((poles - MAX_DISTANCE_KM).abs() < 1e-6);
    }

    #[test]
    fn non_finite_propagates_nan() {
        let a = GeoPoint::new(f64::NAN, 0.0, "bad");
        assert!(!a.is_finite());
        assert!(distance_km(&a, &new_york()).is_nan());
    }

    #[test]
    fn eta_is_distance_over_speed() {
        assert_eq!(eta_hours(400.0, 80.0), 5.0);
        assert_eq!(eta_hours(0.0, 80.0), 0.0);
    }

    #[test]
    fn lerp_midpoint_and_end() {
        let (a, b) = (new_york(), los_angeles());
        let mid = a.lerp(&b, 0.5, "mid");
        assert!((mid.lat - (a.lat + b.lat) / 2.0).abs() < 1e-12);
        assert!((mid.lng - (a.lng + b.lng) / 2.0).abs() < 1e-12);

        let end = a.lerp(&b, 1.0, "end");
        assert_eq!((end.lat, end.lng), (b.lat, b.lng));
        let start = a.lerp(&b, -3.0, "start");
        assert_eq!((start.lat, start.lng), (a.lat, a.lng));
    }

    #[test]
    fn parse_coordinates() {
        let p: GeoPoint = "40.7128, -74.006".parse().unwrap();
        assert_eq!((p.lat, p.lng), (40.7128, -74.006));

        assert_eq!(
            "40.7".parse::<GeoPoint>(),
            Err(ParseGeoPointError::Format("40.7".to_string()))
        );
        assert_eq!(
            "abc,1".parse::<GeoPoint>(),
            Err(ParseGeoPointError::Number("abc".to_string()))
        );
        assert_eq!(
            "91,1".parse::<GeoPoint>(),
            Err(ParseGeoPointError::Latitude(91.0))
        );
        assert_eq!(
            "1,-181".parse::<GeoPoint>(),
            Err(ParseGeoPointError::Longitude(-181.0))
        );
    }
}
