use futures_util::StreamExt;

use crate::simulation::in_transit;
use crate::track::Track;

use super::TaskParams;

pub struct SimulationOutcome {
    pub ticks: u64,
    pub track: Track,
}

/// Drives the simulator on its tick period and publishes every new deployment list through
/// `params.fleet`. Runs until shutdown, or until nothing is in transit if `until_complete`.
#[tracing::instrument(
    skip_all,
    fields(
        increment = params.simulator.increment,
        period_ms = params.simulator.period.as_millis() as u64
    )
)]
pub async fn simulate(params: TaskParams) -> Result<SimulationOutcome, crate::error::Error> {
    params.simulator.validate()?;
    tracing::debug!("simulation started");

    let mut track = Track::default();
    let mut tick = 0;
    let initial = params.fleet.borrow().clone();
    if !track.next(tick, &initial) && params.until_complete {
        tracing::info!("nothing in transit");
        return Ok(SimulationOutcome { ticks: tick, track });
    }

    let mut interval =
        crate::utils::interval::interval(params.simulator.period, &params.shutdown);

    while interval.next().await.is_some() {
        tick += 1;
        let current = params.fleet.borrow().clone();
        let next = params.simulator.tick(&current, tick);
        let moving = track.next(tick, &next);

        if in_transit(&current) != in_transit(&next) {
            tracing::debug!(tick, in_transit = in_transit(&next), "fleet changed");
        }
        params.fleet.send_replace(next);

        if !moving && params.until_complete {
            tracing::info!(tick, "all deployments arrived");
            break;
        }
    }

    tracing::debug!(tick, "simulation stopped");
    Ok(SimulationOutcome { ticks: tick, track })
}
