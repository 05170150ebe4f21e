use serde::Serialize;
use time::OffsetDateTime;

use crate::data::VehicleType;
use crate::geo::GeoPoint;
use crate::route::Route;

pub const MAX_PROGRESS: f64 = 100.0;

const EN_ROUTE: &str = "En Route";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    InTransit,
    Completed,
    Alert,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Status::InTransit => "In Transit",
            Status::Completed => "Completed",
            Status::Alert => "Alert",
        })
    }
}

/// A vehicle's one-way trip between two points.
///
/// Progress and position are only changed through [`Deployment::advance`], which keeps the
/// position on the straight line between origin and destination.
#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub id: String,
    pub vehicle: &'static VehicleType,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_km: f64,
    pub eta_hours: f64,
    progress: f64,
    position: GeoPoint,
    status: Status,
    #[serde(with = "time::serde::rfc3339")]
    last_update: OffsetDateTime,
}

impl Deployment {
    pub fn new(
        id: impl Into<String>,
        vehicle: &'static VehicleType,
        route: &Route,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle,
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            distance_km: route.distance_km,
            eta_hours: route.eta_hours,
            progress: 0.0,
            position: route.origin.clone(),
            status: Status::InTransit,
            last_update: now,
        }
    }

    /// Deploys `vehicle` on `route`, deriving the identifier from the deployment time.
    pub fn deploy(vehicle: &'static VehicleType, route: &Route, now: OffsetDateTime) -> Self {
        let id = format!("VEH-{}", now.unix_timestamp_nanos() / 1_000_000);
        tracing::info!(
            id = %id,
            vehicle = vehicle.name,
            from = %route.origin.label,
            to = %route.destination.label,
            "vehicle deployed"
        );
        Self::new(id, vehicle, route, now)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn position(&self) -> &GeoPoint {
        &self.position
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn last_update(&self) -> OffsetDateTime {
        self.last_update
    }

    pub fn is_in_transit(&self) -> bool {
        self.status == Status::InTransit
    }

    /// Hours left until arrival, assuming the remaining share of the ETA.
    pub fn remaining_eta_hours(&self) -> f64 {
        self.eta_hours - (self.progress / MAX_PROGRESS) * self.eta_hours
    }

    /// Moves the deployment `increment` percentage points further along its route.
    ///
    /// Deployments that are not in transit are returned unchanged.
    pub fn advance(&self, increment: f64, at: OffsetDateTime) -> Deployment {
        if !self.is_in_transit() {
            return self.clone();
        }

        let progress = (self.progress + increment.max(0.0)).min(MAX_PROGRESS);
        let completed = progress >= MAX_PROGRESS;
        let label = if completed {
            self.destination.label.as_str()
        } else {
            EN_ROUTE
        };
        let position = self
            .origin
            .lerp(&self.destination, progress / MAX_PROGRESS, label);

        if completed {
            tracing::info!(id = %self.id, at = %at, "deployment completed");
        }

        Deployment {
            progress,
            position,
            status: if completed {
                Status::Completed
            } else {
                Status::InTransit
            },
            last_update: at,
            ..self.clone()
        }
    }

    /// Flags an in-transit deployment. Completed deployments are never flagged.
    pub fn raise_alert(&self, at: OffsetDateTime) -> Deployment {
        if !self.is_in_transit() {
            return self.clone();
        }

        tracing::warn!(id = %self.id, progress = self.progress, "deployment alert raised");
        Deployment {
            status: Status::Alert,
            last_update: at,
            ..self.clone()
        }
    }
}

/// The deployment the fleet starts out with: heavy cargo from Base Alpha to Base Bravo.
///
/// Name, distance and ETA come from the vehicle catalog and the route planner, so the demo
/// agrees with what `route` prints for the same pair.
pub fn demo_deployment(now: OffsetDateTime) -> Option<Deployment> {
    let vehicle = VehicleType::by_id("heavy-cargo")?;
    let route = Route::plan(
        crate::data::named_location("Base Alpha")?,
        crate::data::named_location("Base Bravo")?,
        crate::data::DEFAULT_SPEED_KMH,
    );
    Some(Deployment::new("DEMO-001", vehicle, &route, now))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn deployment() -> Deployment {
        demo_deployment(datetime!(2024-05-01 12:00 UTC)).unwrap()
    }

    #[test]
    fn starts_at_origin() {
        let d = deployment();
        assert_eq!(d.progress(), 0.0);
        assert_eq!(d.status(), Status::InTransit);
        assert_eq!(d.position(), &d.origin);
        assert_eq!(d.remaining_eta_hours(), d.eta_hours);
    }

    #[test]
    fn advance_interpolates() {
        let at = datetime!(2024-05-01 12:01 UTC);
        let d = deployment().advance(50.0, at);
        assert_eq!(d.progress(), 50.0);
        assert_eq!(d.status(), Status::InTransit);
        assert_eq!(d.last_update(), at);
        assert_eq!(d.position().label, "En Route");
        assert!((d.position().lat - (d.origin.lat + d.destination.lat) / 2.0).abs() < 1e-12);
        assert!((d.remaining_eta_hours() - d.eta_hours / 2.0).abs() < 1e-12);
    }

    #[test]
    #[tracing_test::traced_test]
    fn advance_caps_and_completes() {
        let at = datetime!(2024-05-01 12:01 UTC);
        let d = deployment().advance(99.5, at).advance(7.0, at);
        assert_eq!(d.progress(), MAX_PROGRESS);
        assert_eq!(d.status(), Status::Completed);
        assert_eq!(d.position().lat, d.destination.lat);
        assert_eq!(d.position().lng, d.destination.lng);
        assert_eq!(d.remaining_eta_hours(), 0.0);
        assert!(logs_contain("deployment completed"));

        let later = datetime!(2024-05-01 13:00 UTC);
        let again = d.advance(0.5, later);
        assert_eq!(again.progress(), MAX_PROGRESS);
        assert_eq!(again.last_update(), at);
        assert_eq!(again.position(), d.position());
    }

    #[test]
    fn negative_increment_does_not_regress() {
        let at = datetime!(2024-05-01 12:01 UTC);
        let d = deployment().advance(10.0, at).advance(-5.0, at);
        assert_eq!(d.progress(), 10.0);
    }

    #[test]
    fn alert_is_terminal_for_simulation() {
        let at = datetime!(2024-05-01 12:01 UTC);
        let d = deployment().advance(10.0, at).raise_alert(at);
        assert_eq!(d.status(), Status::Alert);
        let next = d.advance(0.5, datetime!(2024-05-01 12:02 UTC));
        assert_eq!(next.progress(), 10.0);
        assert_eq!(next.status(), Status::Alert);

        let done = deployment().advance(100.0, at).raise_alert(at);
        assert_eq!(done.status(), Status::Completed);
    }

    #[test]
    fn deploy_derives_identifier() {
        let route = Route::plan(
            GeoPoint::new(0.0, 0.0, "a"),
            GeoPoint::new(0.0, 1.0, "b"),
            80.0,
        );
        let d = Deployment::deploy(
            VehicleType::by_id("supply").unwrap(),
            &route,
            datetime!(2024-05-01 12:00 UTC),
        );
        assert_eq!(d.id, "VEH-1714564800000");
        assert_eq!(d.vehicle.name, "Supply Truck");
    }

    #[test]
    fn demo_matches_planned_route() {
        let d = deployment();
        assert_eq!(d.id, "DEMO-001");
        assert_eq!(d.vehicle.name, "Heavy Cargo");
        assert_eq!(d.origin.label, "Base Alpha");
        assert_eq!(d.destination.label, "Base Bravo");

        let planned = Route::plan(
            d.origin.clone(),
            d.destination.clone(),
            crate::data::DEFAULT_SPEED_KMH,
        );
        assert_eq!(d.distance_km, planned.distance_km);
        assert_eq!(d.eta_hours, planned.eta_hours);
        assert!((3935.0..3945.0).contains(&d.distance_km));
        assert!((49.0..49.4).contains(&d.eta_hours));
    }
}
