use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use time::macros::format_description;
use tokio::sync::watch;

use crate::data::{VehicleType, DEFAULT_SPEED_KMH};
use crate::deployment::{demo_deployment, Deployment};
use crate::geolocation::EnvGeolocation;
use crate::route::Route;
use crate::simulation::{Simulator, DEFAULT_INCREMENT, DEFAULT_PERIOD_MS};
use crate::tasks::TaskParams;
use crate::utils::shutdown::ShutdownHandle;

use super::{parse_increment, parse_period_ms, parse_speed, resolve_location, Endpoint};

/// Deploy a vehicle and simulate its progress until arrival or CTRL+C
#[derive(clap::Parser)]
pub struct Opts {
    /// Predefined location name, `<lat>,<lng>`, or `current`
    #[clap(long)]
    from: String,
    /// Predefined location name, `<lat>,<lng>`, or `current`
    #[clap(long)]
    to: String,
    #[clap(long, default_value = "heavy-cargo")]
    vehicle: String,
    /// Average speed in km/h used for the ETA
    #[clap(
        long,
        env = "CONVOY_SPEED_KMH",
        default_value_t = DEFAULT_SPEED_KMH,
        parse(try_from_str = parse_speed)
    )]
    speed: f64,
    /// Progress in percentage points per tick
    #[clap(
        long,
        env = "CONVOY_TICK_INCREMENT",
        default_value_t = DEFAULT_INCREMENT,
        parse(try_from_str = parse_increment)
    )]
    increment: f64,
    /// Tick period in milliseconds
    #[clap(
        long,
        env = "CONVOY_TICK_MS",
        default_value_t = DEFAULT_PERIOD_MS,
        parse(try_from_str = parse_period_ms)
    )]
    period_ms: u64,
    /// Stop once every deployment arrived
    #[clap(long)]
    until_complete: bool,
    /// Also simulate the Base Alpha to Base Bravo demo deployment
    #[clap(long)]
    demo: bool,
    /// Write an SVG chart of the recorded tracks
    #[clap(long)]
    chart: Option<PathBuf>,
    #[clap(long)]
    json: bool,
}

pub async fn execute(opts: Opts, shutdown: ShutdownHandle) -> Result<(), crate::error::Error> {
    let now = super::now();
    let vehicle = VehicleType::by_id(&opts.vehicle)
        .ok_or_else(|| crate::error::Error::UnknownVehicle(opts.vehicle.clone()))?;

    let geolocation = EnvGeolocation;
    let route = Route::plan(
        resolve_location(&opts.from, Endpoint::Start, &geolocation)?,
        resolve_location(&opts.to, Endpoint::End, &geolocation)?,
        opts.speed,
    );

    let mut fleet = Vec::new();
    if opts.demo {
        fleet.extend(demo_deployment(now));
    }
    fleet.push(Deployment::deploy(vehicle, &route, now));

    let simulator = Simulator::new(now)
        .with_increment(opts.increment)
        .with_period(Duration::from_millis(opts.period_ms));
    match (simulator.ticks_to_complete(), simulator.time_to_complete()) {
        (Some(ticks), Some(duration)) => {
            tracing::info!(ticks, secs = duration.as_secs_f64(), "simulating")
        }
        _ => tracing::warn!(increment = opts.increment, "deployments will never arrive"),
    }

    let (tx, rx) = watch::channel(fleet);
    let reporter = tokio::spawn(report_progress(rx.clone()));

    let outcome = crate::tasks::simulate::simulate(TaskParams {
        simulator,
        until_complete: opts.until_complete,
        fleet: tx,
        shutdown,
    })
    .await?;
    reporter.await.ok();

    let fleet = rx.borrow().clone();
    let mut out = std::io::stdout().lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut out, &fleet)?;
        writeln!(out)?;
    } else {
        write_fleet(&mut out, &fleet)?;
    }

    if let Some(path) = &opts.chart {
        crate::draw::draw_tracks(path, &outcome.track.finish())?;
        tracing::info!(path = %path.display(), ticks = outcome.ticks, "chart written");
    }

    Ok(())
}

/// Logs a line whenever a deployment enters a new tenth of its route.
async fn report_progress(mut rx: watch::Receiver<Vec<Deployment>>) {
    let mut reported: HashMap<String, u32> = HashMap::new();

    while rx.changed().await.is_ok() {
        let fleet = rx.borrow().clone();
        for d in &fleet {
            let decile = (d.progress() / 10.0).floor() as u32;
            if reported.insert(d.id.clone(), decile) == Some(decile) {
                continue;
            }

            tracing::info!(
                id = %d.id,
                status = %d.status(),
                progress = d.progress(),
                lat = d.position().lat,
                lng = d.position().lng,
                remaining_eta_hours = d.remaining_eta_hours(),
                "progress"
            );
        }
    }
}

pub fn write_fleet(out: &mut impl Write, fleet: &[Deployment]) -> Result<(), crate::error::Error> {
    let clock = format_description!("[hour]:[minute]:[second]");

    for d in fleet {
        writeln!(
            out,
            "{} {} {} [{}]",
            d.vehicle.icon, d.vehicle.name, d.id, d.status()
        )?;
        writeln!(out, "  {} → {}", d.origin.label, d.destination.label)?;
        writeln!(
            out,
            "  {:.1}% at ({:.4}, {:.4}), ETA: {:.1} hours remaining",
            d.progress(),
            d.position().lat,
            d.position().lng,
            d.remaining_eta_hours()
        )?;
        writeln!(
            out,
            "  {:.2} km total • Last update: {}",
            d.distance_km,
            d.last_update().format(&clock)?
        )?;
    }

    Ok(())
}
