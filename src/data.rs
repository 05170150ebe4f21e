use once_cell::sync::Lazy;
use serde::Serialize;

use crate::geo::GeoPoint;

// Fleet catalog as shown on the dashboard. Speeds are nominal and are not used for ETAs, which
// are estimated at a uniform average speed (see `DEFAULT_SPEED_KMH`).

/// Average speed in km/h used for every ETA estimate unless configured otherwise.
pub const DEFAULT_SPEED_KMH: f64 = 80.0;

pub static VEHICLE_TYPES: [VehicleType; 6] = [
    VehicleType {
        id: "heavy-cargo",
        name: "Heavy Cargo",
        capacity: 15000,
        speed_kmh: 80.0,
        icon: "🚛",
    },
    VehicleType {
        id: "personnel",
        name: "Personnel Transport",
        capacity: 50,
        speed_kmh: 100.0,
        icon: "🚌",
    },
    VehicleType {
        id: "supply",
        name: "Supply Truck",
        capacity: 8000,
        speed_kmh: 90.0,
        icon: "📦",
    },
    VehicleType {
        id: "fuel",
        name: "Fuel Tanker",
        capacity: 30000,
        speed_kmh: 70.0,
        icon: "⛽",
    },
    VehicleType {
        id: "command",
        name: "Command Vehicle",
        capacity: 20,
        speed_kmh: 110.0,
        icon: "📡",
    },
    VehicleType {
        id: "medical",
        name: "Medical Unit",
        capacity: 30,
        speed_kmh: 100.0,
        icon: "🚑",
    },
];

#[derive(Debug, PartialEq, Serialize)]
pub struct VehicleType {
    pub id: &'static str,
    pub name: &'static str,
    /// Payload in kg, or seats for personnel carriers.
    pub capacity: u32,
    pub speed_kmh: f64,
    pub icon: &'static str,
}

impl VehicleType {
    pub fn by_id(id: &str) -> Option<&'static VehicleType> {
        VEHICLE_TYPES.iter().find(|v| v.id.eq_ignore_ascii_case(id))
    }
}

const NAMED_LOCATIONS: [(&str, f64, f64); 5] = [
    ("Base Alpha", 40.7128, -74.006),
    ("Base Bravo", 34.0522, -118.2437),
    ("Depot Charlie", 41.8781, -87.6298),
    ("Depot Delta", 29.7604, -95.3698),
    ("Command Center", 37.7749, -122.4194),
];

pub fn named_locations() -> impl Iterator<Item = GeoPoint> {
    NAMED_LOCATIONS
        .iter()
        .map(|(name, lat, lng)| GeoPoint::new(*lat, *lng, *name))
}

/// Looks up a predefined location by name, ignoring case.
pub fn named_location(name: &str) -> Option<GeoPoint> {
    named_locations().find(|l| l.label.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckpointKind {
    Fuel,
    Supplies,
    Rest,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Checkpoint {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: CheckpointKind,
    /// Distance from the route's origin in km.
    pub distance_km: f64,
    pub services: &'static [&'static str],
    pub rest_minutes: u32,
}

pub static CHECKPOINTS: [Checkpoint; 4] = [
    Checkpoint {
        id: "CP-001",
        name: "Service Station Alpha",
        kind: CheckpointKind::Fuel,
        distance_km: 50.0,
        services: &["Diesel Fuel", "Premium Fuel"],
        rest_minutes: 15,
    },
    Checkpoint {
        id: "CP-002",
        name: "Supply Hub Beta",
        kind: CheckpointKind::Supplies,
        distance_km: 100.0,
        services: &["Rations", "Medical Kits", "Ammunition", "Equipment"],
        rest_minutes: 20,
    },
    Checkpoint {
        id: "CP-003",
        name: "Rest Camp Gamma",
        kind: CheckpointKind::Rest,
        distance_km: 150.0,
        services: &["Personnel Rest Area", "Accommodation", "Dining Facility"],
        rest_minutes: 45,
    },
    Checkpoint {
        id: "CP-004",
        name: "Emergency Outpost Delta",
        kind: CheckpointKind::Fuel,
        distance_km: 180.0,
        services: &["Emergency Fuel", "Medical Support", "Vehicle Repair"],
        rest_minutes: 30,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionStatus {
    Optimized,
    PendingApproval,
}

#[derive(Debug, Serialize)]
pub struct RouteSuggestion {
    pub id: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub distance_km: f64,
    /// Planned travel time in minutes.
    pub duration_minutes: u32,
    /// Efficiency rating in percent.
    pub efficiency: u8,
    pub vehicles: u32,
    pub status: SuggestionStatus,
    pub checkpoints: &'static [Checkpoint],
}

pub static ROUTE_SUGGESTIONS: Lazy<Vec<RouteSuggestion>> = Lazy::new(|| {
    vec![
        RouteSuggestion {
            id: "R-001",
            from: "Base-A",
            to: "Forward Post 1",
            distance_km: 145.0,
            duration_minutes: 200,
            efficiency: 92,
            vehicles: 3,
            status: SuggestionStatus::Optimized,
            checkpoints: &CHECKPOINTS[..2],
        },
        RouteSuggestion {
            id: "R-002",
            from: "Base-B",
            to: "Supply Depot",
            distance_km: 89.0,
            duration_minutes: 135,
            efficiency: 88,
            vehicles: 2,
            status: SuggestionStatus::Optimized,
            checkpoints: &CHECKPOINTS[..1],
        },
        RouteSuggestion {
            id: "R-003",
            from: "Forward Post 2",
            to: "Base-A",
            distance_km: 167.0,
            duration_minutes: 225,
            efficiency: 85,
            vehicles: 4,
            status: SuggestionStatus::PendingApproval,
            checkpoints: &CHECKPOINTS[..3],
        },
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyStatus {
    Safe,
    Detour,
    Incident,
}

#[derive(Debug, Serialize)]
pub struct TripReport {
    pub trip_id: &'static str,
    pub vehicle_type: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub distance_km: f64,
    pub planned_eta_hours: f64,
    pub actual_hours: f64,
    pub safety: SafetyStatus,
    pub detour_reason: Option<&'static str>,
    pub detoured_distance_km: Option<f64>,
    pub incidents: &'static [&'static str],
    pub completion: f64,
}

pub static TRIP_REPORTS: [TripReport; 6] = [
    TripReport {
        trip_id: "TRIP-001",
        vehicle_type: "Heavy Cargo Truck",
        from: "Base Alpha",
        to: "Base Bravo",
        distance_km: 3944.0,
        planned_eta_hours: 49.3,
        actual_hours: 48.5,
        safety: SafetyStatus::Safe,
        detour_reason: None,
        detoured_distance_km: None,
        incidents: &[],
        completion: 100.0,
    },
    TripReport {
        trip_id: "TRIP-002",
        vehicle_type: "Personnel Transport",
        from: "Base Bravo",
        to: "Base Charlie",
        distance_km: 2156.0,
        planned_eta_hours: 27.0,
        actual_hours: 33.2,
        safety: SafetyStatus::Detour,
        detour_reason: Some("Road blockage at Mile 15"),
        detoured_distance_km: Some(2456.0),
        incidents: &[],
        completion: 100.0,
    },
    TripReport {
        trip_id: "TRIP-003",
        vehicle_type: "Supply Truck",
        from: "Base Charlie",
        to: "Checkpoint Delta",
        distance_km: 1876.0,
        planned_eta_hours: 23.5,
        actual_hours: 45.8,
        safety: SafetyStatus::Incident,
        detour_reason: None,
        detoured_distance_km: Some(2634.0),
        incidents: &[
            "Suspected terrorist hinderance at Mile 8",
            "Emergency reroute activated",
            "Security protocol engaged",
        ],
        completion: 100.0,
    },
    TripReport {
        trip_id: "TRIP-004",
        vehicle_type: "Fuel Tanker",
        from: "Base Delta",
        to: "Base Echo",
        distance_km: 3200.0,
        planned_eta_hours: 40.0,
        actual_hours: 39.8,
        safety: SafetyStatus::Safe,
        detour_reason: None,
        detoured_distance_km: None,
        incidents: &[],
        completion: 100.0,
    },
    TripReport {
        trip_id: "TRIP-005",
        vehicle_type: "Medical Unit",
        from: "Base Echo",
        to: "Forward Operating Base",
        distance_km: 2890.0,
        planned_eta_hours: 36.1,
        actual_hours: 36.5,
        safety: SafetyStatus::Safe,
        detour_reason: None,
        detoured_distance_km: None,
        incidents: &[],
        completion: 100.0,
    },
    TripReport {
        trip_id: "TRIP-006",
        vehicle_type: "Command Vehicle",
        from: "Forward Operating Base",
        to: "Base Alpha",
        distance_km: 4156.0,
        planned_eta_hours: 52.0,
        actual_hours: 61.2,
        safety: SafetyStatus::Detour,
        detour_reason: Some("Weather conditions and road damage"),
        detoured_distance_km: Some(4678.0),
        incidents: &[],
        completion: 100.0,
    },
];
