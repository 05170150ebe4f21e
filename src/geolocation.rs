use crate::geo::GeoPoint;

pub const LAT_VAR: &str = "CONVOY_LAT";
pub const LNG_VAR: &str = "CONVOY_LNG";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("permission to access the current location was denied")]
    PermissionDenied,
    #[error("current location is unavailable: {0}")]
    Unavailable(String),
    #[error("timed out while determining the current location")]
    Timeout,
}

/// Host capability that knows where "here" is.
pub trait Geolocate {
    fn current_position(&self) -> Result<GeoPoint, GeolocationError>;
}

/// Reads the current position from `CONVOY_LAT` and `CONVOY_LNG`.
#[derive(Debug, Default)]
pub struct EnvGeolocation;

impl Geolocate for EnvGeolocation {
    fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| GeolocationError::Unavailable(format!("{} not set", name)))
        };
        let coords = format!("{},{}", var(LAT_VAR)?, var(LNG_VAR)?);
        coords
            .parse()
            .map_err(|err: crate::geo::ParseGeoPointError| {
                GeolocationError::Unavailable(err.to_string())
            })
    }
}

/// A provider that always reports the same outcome.
#[derive(Debug)]
pub struct FixedGeolocation(pub Result<GeoPoint, GeolocationError>);

impl Geolocate for FixedGeolocation {
    fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        self.0.clone()
    }
}

/// Resolves the current position for prefilling a route endpoint.
///
/// Failures are logged and leave the endpoint unset.
pub fn prefill(provider: &dyn Geolocate, label: &str) -> Option<GeoPoint> {
    match provider.current_position() {
        Ok(point) => Some(point.with_label(label)),
        Err(err) => {
            tracing::warn!(%err, label, "could not determine current location");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn from_env(lat: Option<&str>, lng: Option<&str>) -> Result<GeoPoint, GeolocationError> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        for (name, value) in [(LAT_VAR, lat), (LNG_VAR, lng)] {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
        let result = EnvGeolocation.current_position();
        std::env::remove_var(LAT_VAR);
        std::env::remove_var(LNG_VAR);
        result
    }

    #[test]
    fn env_unset_is_unavailable() {
        assert_eq!(
            from_env(None, None),
            Err(GeolocationError::Unavailable("CONVOY_LAT not set".into()))
        );
        assert_eq!(
            from_env(Some("48.1"), None),
            Err(GeolocationError::Unavailable("CONVOY_LNG not set".into()))
        );
    }

    #[test]
    fn env_malformed_is_unavailable() {
        for (lat, lng) in [("abc", "11.5"), ("48.1", ""), ("95", "11.5"), ("48.1", "-181")] {
            assert!(
                matches!(from_env(Some(lat), Some(lng)), Err(GeolocationError::Unavailable(_))),
                "{},{}",
                lat,
                lng
            );
        }
    }

    #[test]
    fn env_position() {
        let point = from_env(Some("48.1"), Some(" 11.5")).unwrap();
        assert_eq!((point.lat, point.lng), (48.1, 11.5));
    }

    #[test]
    #[tracing_test::traced_test]
    fn failure_leaves_point_unset() {
        let provider = FixedGeolocation(Err(GeolocationError::PermissionDenied));
        assert_eq!(prefill(&provider, "Current Location (Start)"), None);
        assert!(logs_contain("could not determine current location"));
    }

    #[test]
    fn success_is_relabeled() {
        let provider = FixedGeolocation(Ok(GeoPoint::new(1.0, 2.0, "gps")));
        let point = prefill(&provider, "Current Location (End)").unwrap();
        assert_eq!((point.lat, point.lng), (1.0, 2.0));
        assert_eq!(point.label, "Current Location (End)");
    }
}
