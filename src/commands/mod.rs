use time::OffsetDateTime;

use crate::data::named_location;
use crate::geo::{GeoPoint, ParseGeoPointError};
use crate::geolocation::{prefill, Geolocate};

pub mod report;
pub mod route;
pub mod routes;
pub mod simulate;

/// Location argument that refers to the host's current position.
pub const CURRENT: &str = "current";

/// Longest accepted tick period (one hour).
pub const MAX_PERIOD_MS: u64 = 3_600_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidOption {
    #[error("speed must be a positive number of km/h, got `{0}`")]
    Speed(String),
    #[error("tick period must be between 1 and {} ms, got `{0}`", MAX_PERIOD_MS)]
    Period(String),
    #[error("increment must be a positive number of percentage points, got `{0}`")]
    Increment(String),
}

pub fn parse_speed(s: &str) -> Result<f64, InvalidOption> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| InvalidOption::Speed(s.to_string()))
}

pub fn parse_period_ms(s: &str) -> Result<u64, InvalidOption> {
    s.trim()
        .parse::<u64>()
        .ok()
        .filter(|v| (1..=MAX_PERIOD_MS).contains(v))
        .ok_or_else(|| InvalidOption::Period(s.to_string()))
}

pub fn parse_increment(s: &str) -> Result<f64, InvalidOption> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| InvalidOption::Increment(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("`{0}` is neither a known location nor `<lat>,<lng>`: {1}")]
    Invalid(String, #[source] ParseGeoPointError),
    #[error("current location could not be determined")]
    Unresolved,
}

#[derive(Debug, Clone, Copy)]
pub enum Endpoint {
    Start,
    End,
}

/// Resolves a location argument: `current`, a predefined location name, or `<lat>,<lng>`.
pub fn resolve_location(
    arg: &str,
    endpoint: Endpoint,
    geolocation: &dyn Geolocate,
) -> Result<GeoPoint, LocationError> {
    if arg.trim().eq_ignore_ascii_case(CURRENT) {
        let label = match endpoint {
            Endpoint::Start => "Current Location (Start)",
            Endpoint::End => "Current Location (End)",
        };
        return prefill(geolocation, label).ok_or(LocationError::Unresolved);
    }

    if let Some(location) = named_location(arg) {
        return Ok(location);
    }

    let point: GeoPoint = arg
        .parse()
        .map_err(|err| LocationError::Invalid(arg.to_string(), err))?;
    Ok(point.with_label(match endpoint {
        Endpoint::Start => "Custom Start Point",
        Endpoint::End => "Custom Destination",
    }))
}

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::{FixedGeolocation, GeolocationError};

    #[test]
    fn resolves_names_and_coordinates() {
        let geo = FixedGeolocation(Err(GeolocationError::Timeout));

        let named = resolve_location("Depot Delta", Endpoint::Start, &geo).unwrap();
        assert_eq!((named.lat, named.lng), (29.7604, -95.3698));

        let custom = resolve_location("41.2,-74.5", Endpoint::End, &geo).unwrap();
        assert_eq!(custom.label, "Custom Destination");
        assert_eq!((custom.lat, custom.lng), (41.2, -74.5));

        assert!(matches!(
            resolve_location("Atlantis", Endpoint::End, &geo),
            Err(LocationError::Invalid(..))
        ));
    }

    #[test]
    fn option_parsers() {
        assert_eq!(parse_speed("80"), Ok(80.0));
        for bad in ["0", "-10", "inf", "NaN", "fast"] {
            assert_eq!(parse_speed(bad), Err(InvalidOption::Speed(bad.to_string())));
        }

        assert_eq!(parse_period_ms("500"), Ok(500));
        for bad in ["0", "-1", "3600001", "18446744073709551615"] {
            assert_eq!(parse_period_ms(bad), Err(InvalidOption::Period(bad.to_string())));
        }

        assert_eq!(parse_increment("0.1"), Ok(0.1));
        for bad in ["0", "-0.5", "inf"] {
            assert_eq!(parse_increment(bad), Err(InvalidOption::Increment(bad.to_string())));
        }
    }

    #[test]
    fn current_location() {
        let denied = FixedGeolocation(Err(GeolocationError::PermissionDenied));
        assert!(matches!(
            resolve_location("current", Endpoint::Start, &denied),
            Err(LocationError::Unresolved)
        ));

        let here = FixedGeolocation(Ok(GeoPoint::new(48.1, 11.5, "gps")));
        let start = resolve_location("Current", Endpoint::Start, &here).unwrap();
        assert_eq!(start.label, "Current Location (Start)");
    }
}
