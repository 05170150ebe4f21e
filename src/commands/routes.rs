use std::io::Write;

use serde::Serialize;

use crate::approvals::{checkpoint_position, ApprovedRoute, RouteBook};
use crate::data::{RouteSuggestion, SuggestionStatus, ROUTE_SUGGESTIONS};
use crate::utils::format_minutes;

/// List route suggestions with their checkpoints and approve some of them
#[derive(clap::Parser)]
pub struct Opts {
    /// Route id to approve, can be used multiple times
    #[clap(long = "approve")]
    approve: Vec<String>,
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    suggestions: Vec<&'a RouteSuggestion>,
    approved: &'a [ApprovedRoute],
}

pub fn execute(opts: Opts) -> Result<(), crate::error::Error> {
    let mut book = RouteBook::new(&ROUTE_SUGGESTIONS);
    for id in &opts.approve {
        book.approve(id, super::now())?;
    }

    let listing = Listing {
        suggestions: book.available().collect(),
        approved: book.approved(),
    };

    let mut out = std::io::stdout().lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut out, &listing)?;
        writeln!(out)?;
    } else {
        write_listing(&mut out, &listing)?;
    }

    Ok(())
}

fn write_listing(out: &mut impl Write, listing: &Listing<'_>) -> Result<(), crate::error::Error> {
    writeln!(out, "Route Suggestions ({})", listing.suggestions.len())?;
    for route in &listing.suggestions {
        let status = match route.status {
            SuggestionStatus::Optimized => "Optimized",
            SuggestionStatus::PendingApproval => "Pending Approval",
        };
        writeln!(
            out,
            "{}: {} → {} | {} km | {} | {} vehicles | {}% efficient | {}",
            route.id,
            route.from,
            route.to,
            route.distance_km,
            format_minutes(route.duration_minutes),
            route.vehicles,
            route.efficiency,
            status
        )?;
        for cp in route.checkpoints {
            writeln!(
                out,
                "  {:>5.1}% {} ({} km, {} min rest): {}",
                checkpoint_position(cp, route.distance_km),
                cp.name,
                cp.distance_km,
                cp.rest_minutes,
                cp.services.join(", ")
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Approved Routes ({})", listing.approved.len())?;
    for route in listing.approved {
        writeln!(
            out,
            "{}: {} → {} | {} km | {} | approved {}",
            route.id,
            route.from,
            route.to,
            route.distance_km,
            format_minutes(route.duration_minutes),
            route
                .approved_at
                .format(&time::format_description::well_known::Rfc3339)?
        )?;
    }

    Ok(())
}
