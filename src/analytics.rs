use serde::Serialize;

use crate::data::{SafetyStatus, TripReport};

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct TripSummary {
    pub trips: usize,
    pub safe: usize,
    pub detour: usize,
    pub incident: usize,
    /// Share of safe trips in percent.
    pub safety_percentage: f64,
    /// Mean absolute difference between planned and actual duration in hours.
    pub avg_time_variance_hours: f64,
}

impl TripReport {
    pub fn time_variance_hours(&self) -> f64 {
        self.actual_hours - self.planned_eta_hours
    }

    /// Extra distance driven because of a detour, if any.
    pub fn extra_distance_km(&self) -> Option<f64> {
        self.detoured_distance_km.map(|d| d - self.distance_km)
    }
}

pub fn summarize<'a>(trips: impl IntoIterator<Item = &'a TripReport>) -> TripSummary {
    let mut summary = TripSummary::default();
    let mut variance = 0.0;

    for trip in trips {
        summary.trips += 1;
        match trip.safety {
            SafetyStatus::Safe => summary.safe += 1,
            SafetyStatus::Detour => summary.detour += 1,
            SafetyStatus::Incident => summary.incident += 1,
        }
        variance += trip.time_variance_hours().abs();
    }

    if summary.trips > 0 {
        let n = summary.trips as f64;
        summary.safety_percentage = summary.safe as f64 / n * 100.0;
        summary.avg_time_variance_hours = variance / n;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TRIP_REPORTS;

    #[test]
    fn catalog_summary() {
        let summary = summarize(&TRIP_REPORTS);
        assert_eq!(summary.trips, 6);
        assert_eq!((summary.safe, summary.detour, summary.incident), (3, 2, 1));
        assert_eq!(summary.safety_percentage, 50.0);
        // 0.8 + 6.2 + 22.3 + 0.2 + 0.4 + 9.2 = 39.1
        assert!((summary.avg_time_variance_hours - 39.1 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(summarize(std::iter::empty()), TripSummary::default());
    }

    #[test]
    fn detour_distance() {
        assert_eq!(TRIP_REPORTS[0].extra_distance_km(), None);
        assert_eq!(TRIP_REPORTS[1].extra_distance_km(), Some(300.0));
    }
}
