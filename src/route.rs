use serde::Serialize;

use crate::geo::{eta_hours, GeoPoint};

/// A confirmed leg between two points together with its estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_km: f64,
    pub eta_hours: f64,
    pub speed_kmh: f64,
}

impl Route {
    pub fn plan(origin: GeoPoint, destination: GeoPoint, speed_kmh: f64) -> Self {
        let distance_km = origin.distance_to(&destination);
        tracing::debug!(
            from = %origin.label,
            to = %destination.label,
            distance_in_km = distance_km,
            speed_kmh,
            "planned route"
        );

        Route {
            eta_hours: eta_hours(distance_km, speed_kmh),
            origin,
            destination,
            distance_km,
            speed_kmh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::named_location;

    #[test]
    #[tracing_test::traced_test]
    fn plan_between_bases() {
        let route = Route::plan(
            named_location("Base Alpha").unwrap(),
            named_location("Base Bravo").unwrap(),
            80.0,
        );
        assert!((3935.0..=3945.0).contains(&route.distance_km));
        assert_eq!(route.eta_hours, route.distance_km / 80.0);
        assert!(logs_contain("planned route"));
    }

    #[test]
    fn eta_follows_speed() {
        let a = GeoPoint::new(0.0, 0.0, "a");
        let b = GeoPoint::new(0.0, 1.0, "b");
        let slow = Route::plan(a.clone(), b.clone(), 40.0);
        let fast = Route::plan(a, b, 80.0);
        assert_eq!(slow.distance_km, fast.distance_km);
        assert!((slow.eta_hours - 2.0 * fast.eta_hours).abs() < 1e-12);
    }
}
