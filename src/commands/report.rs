use std::io::Write;

use serde::Serialize;

use crate::analytics::{summarize, TripSummary};
use crate::data::{SafetyStatus, TripReport, TRIP_REPORTS};

/// Summarize the safety and punctuality of completed trips
#[derive(clap::Parser)]
pub struct Opts {
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: TripSummary,
    trips: &'a [TripReport],
}

pub fn execute(opts: Opts) -> Result<(), crate::error::Error> {
    let report = Report {
        summary: summarize(&TRIP_REPORTS),
        trips: &TRIP_REPORTS,
    };

    let mut out = std::io::stdout().lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write_report(&mut out, &report.summary, report.trips)?;
    }

    Ok(())
}

fn write_report(
    out: &mut impl Write,
    summary: &TripSummary,
    trips: &[TripReport],
) -> std::io::Result<()> {
    writeln!(
        out,
        "Safe arrivals: {:.1}% ({} of {} trips)",
        summary.safety_percentage, summary.safe, summary.trips
    )?;
    writeln!(out, "Detours: {}", summary.detour)?;
    writeln!(out, "Security incidents: {}", summary.incident)?;
    writeln!(
        out,
        "Avg time variance: {:.1} hours",
        summary.avg_time_variance_hours
    )?;

    for trip in trips {
        let outcome = match trip.safety {
            SafetyStatus::Safe => "Safe Arrival",
            SafetyStatus::Detour => "Detour Required",
            SafetyStatus::Incident => "Security Incident",
        };
        writeln!(out)?;
        writeln!(out, "{} [{}]", trip.trip_id, outcome)?;
        writeln!(out, "  {} • {} → {}", trip.vehicle_type, trip.from, trip.to)?;
        writeln!(
            out,
            "  {:.0} km, planned {:.1} h, actual {:.1} h ({:+.1} h)",
            trip.distance_km,
            trip.planned_eta_hours,
            trip.actual_hours,
            trip.time_variance_hours()
        )?;
        if let Some(reason) = trip.detour_reason {
            writeln!(out, "  Detour: {}", reason)?;
        }
        if let Some(extra) = trip.extra_distance_km() {
            writeln!(out, "  Detoured distance: +{:.0} km", extra)?;
        }
        for incident in trip.incidents {
            writeln!(out, "  ! {}", incident)?;
        }
    }

    Ok(())
}
