use std::time::Duration;

use time::OffsetDateTime;

use crate::deployment::{Deployment, MAX_PROGRESS};

pub const DEFAULT_INCREMENT: f64 = 0.5;
pub const DEFAULT_PERIOD_MS: u64 = 500;
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(DEFAULT_PERIOD_MS);

/// Upper bound on how many ticks [`Simulator::ticks_to_complete`] replays exactly.
const MAX_REPLAYED_TICKS: u64 = 1_000_000;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimulationError {
    #[error("tick period must be non-zero")]
    ZeroPeriod,
    #[error("increment must be a finite, non-negative number, got {0}")]
    Increment(f64),
}

/// Fixed-step progress simulation.
///
/// Every tick moves each in-transit deployment by `increment` percentage points, regardless of
/// its distance or vehicle. Tick `n` is stamped `started_at + n * period`, so the outcome only
/// depends on the input list and the tick count.
#[derive(Debug, Clone)]
pub struct Simulator {
    pub increment: f64,
    pub period: Duration,
    pub started_at: OffsetDateTime,
}

impl Simulator {
    pub fn new(started_at: OffsetDateTime) -> Self {
        Self {
            increment: DEFAULT_INCREMENT,
            period: DEFAULT_PERIOD,
            started_at,
        }
    }

    pub fn with_increment(mut self, increment: f64) -> Self {
        self.increment = increment;
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Rejects settings the tick driver cannot run with.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.period.is_zero() {
            return Err(SimulationError::ZeroPeriod);
        }
        if !self.increment.is_finite() || self.increment < 0.0 {
            return Err(SimulationError::Increment(self.increment));
        }
        Ok(())
    }

    pub fn tick_time(&self, tick: u64) -> OffsetDateTime {
        let tick = u32::try_from(tick).unwrap_or(u32::MAX);
        self.started_at + self.period.saturating_mul(tick)
    }

    /// Applies one tick to every deployment and returns the replacement list.
    pub fn tick(&self, deployments: &[Deployment], tick: u64) -> Vec<Deployment> {
        let at = self.tick_time(tick);
        let next: Vec<Deployment> = deployments
            .iter()
            .map(|d| d.advance(self.increment, at))
            .collect();
        tracing::trace!(tick, in_transit = in_transit(&next), "simulation tick");
        next
    }

    /// Number of ticks a fresh deployment needs to complete.
    ///
    /// Progress is accumulated the same way [`Deployment::advance`] does it, so rounding of
    /// increments like 0.1 is accounted for. Beyond a million ticks the result is estimated.
    pub fn ticks_to_complete(&self) -> Option<u64> {
        if self.increment <= 0.0 || !self.increment.is_finite() {
            return None;
        }

        let estimate = (MAX_PROGRESS / self.increment).ceil() as u64;
        if estimate > MAX_REPLAYED_TICKS {
            return Some(estimate);
        }

        let mut progress = 0.0;
        let mut ticks = 0;
        while progress < MAX_PROGRESS {
            progress = (progress + self.increment).min(MAX_PROGRESS);
            ticks += 1;
        }
        Some(ticks)
    }

    /// Simulated wall-clock time until a fresh deployment completes.
    pub fn time_to_complete(&self) -> Option<Duration> {
        self.ticks_to_complete()
            .map(|ticks| Duration::from_secs_f64(self.period.as_secs_f64() * ticks as f64))
    }
}

pub fn in_transit(deployments: &[Deployment]) -> usize {
    deployments.iter().filter(|d| d.is_in_transit()).count()
}
