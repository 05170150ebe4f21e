use crate::deployment::Deployment;
use crate::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub tick: u64,
    pub lat: f64,
    pub lng: f64,
    pub progress: f64,
}

/// Recorded positions of a single deployment.
#[derive(Debug)]
pub struct Series {
    pub id: String,
    pub label: String,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub datums: Vec<Datum>,
}

/// Positions of all deployments over the course of a simulation, one series per deployment in
/// order of first appearance.
#[derive(Debug, Default)]
pub struct Track {
    series: Vec<Series>,
}

impl Track {
    /// Records the positions after `tick`. Returns whether any deployment is still in transit.
    pub fn next(&mut self, tick: u64, deployments: &[Deployment]) -> bool {
        for deployment in deployments {
            let datum = Datum {
                tick,
                lat: deployment.position().lat,
                lng: deployment.position().lng,
                progress: deployment.progress(),
            };

            match self.series.iter_mut().find(|s| s.id == deployment.id) {
                Some(series) => {
                    // skip deployments that did not move since the last tick
                    if series.datums.last().map(|d| d.progress) != Some(datum.progress) {
                        series.datums.push(datum);
                    }
                }
                None => {
                    tracing::trace!(id = %deployment.id, "start tracking");
                    self.series.push(Series {
                        id: deployment.id.clone(),
                        label: format!("{} ({})", deployment.vehicle.name, deployment.id),
                        origin: deployment.origin.clone(),
                        destination: deployment.destination.clone(),
                        datums: vec![datum],
                    });
                }
            }
        }

        deployments.iter().any(|d| d.is_in_transit())
    }

    pub fn finish(self) -> Vec<Series> {
        self.series
    }
}
