use std::io::Write;

use crate::data::DEFAULT_SPEED_KMH;
use crate::geolocation::EnvGeolocation;
use crate::route::Route;

use super::{parse_speed, resolve_location, Endpoint};

/// Estimate distance and ETA between two locations
#[derive(clap::Parser)]
pub struct Opts {
    /// Predefined location name, `<lat>,<lng>`, or `current`
    #[clap(long)]
    from: String,
    /// Predefined location name, `<lat>,<lng>`, or `current`
    #[clap(long)]
    to: String,
    /// Average speed in km/h used for the ETA
    #[clap(
        long,
        env = "CONVOY_SPEED_KMH",
        default_value_t = DEFAULT_SPEED_KMH,
        parse(try_from_str = parse_speed)
    )]
    speed: f64,
    #[clap(long)]
    json: bool,
}

pub fn execute(opts: Opts) -> Result<(), crate::error::Error> {
    let geolocation = EnvGeolocation;
    let route = Route::plan(
        resolve_location(&opts.from, Endpoint::Start, &geolocation)?,
        resolve_location(&opts.to, Endpoint::End, &geolocation)?,
        opts.speed,
    );

    let mut out = std::io::stdout().lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut out, &route)?;
        writeln!(out)?;
    } else {
        write_route(&mut out, &route)?;
    }

    Ok(())
}

pub fn write_route(out: &mut impl Write, route: &Route) -> std::io::Result<()> {
    for (name, p) in [("From", &route.origin), ("To", &route.destination)] {
        writeln!(out, "{:<5} {} ({:.4}, {:.4})", name, p.label, p.lat, p.lng)?;
    }
    writeln!(out, "Distance: {:.2} km", route.distance_km)?;
    writeln!(
        out,
        "ETA: {:.1} hours at avg {} km/h",
        route.eta_hours, route.speed_kmh
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn rejects_unusable_speed() {
        for speed in ["0", "-80", "inf"] {
            let args = ["route", "--from", "Base Alpha", "--to", "Base Bravo", "--speed", speed];
            assert!(Opts::try_parse_from(args).is_err(), "speed {}", speed);
        }

        let args = ["route", "--from", "Base Alpha", "--to", "Base Bravo", "--speed", "60"];
        assert_eq!(Opts::try_parse_from(args).unwrap().speed, 60.0);
    }
    use crate::geo::GeoPoint;

    #[test]
    fn renders_summary() {
        let route = Route::plan(
            GeoPoint::new(0.0, 0.0, "A"),
            GeoPoint::new(0.0, 0.0, "B"),
            80.0,
        );
        let mut out = Vec::new();
        write_route(&mut out, &route).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "From  A (0.0000, 0.0000)\nTo    B (0.0000, 0.0000)\nDistance: 0.00 km\nETA: 0.0 hours at avg 80 km/h\n"
        );
    }
}
