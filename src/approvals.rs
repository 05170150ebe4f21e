use std::collections::HashSet;

use serde::Serialize;
use time::OffsetDateTime;

use crate::data::{Checkpoint, RouteSuggestion};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
    #[error("route `{0}` is already approved")]
    AlreadyApproved(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovedRoute {
    pub id: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub efficiency: u8,
    pub vehicles: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub approved_at: OffsetDateTime,
}

/// Route suggestions and the routes approved from them.
pub struct RouteBook<'a> {
    suggestions: &'a [RouteSuggestion],
    approved: Vec<ApprovedRoute>,
    approved_ids: HashSet<&'static str>,
}

impl<'a> RouteBook<'a> {
    pub fn new(suggestions: &'a [RouteSuggestion]) -> Self {
        Self {
            suggestions,
            approved: Vec::new(),
            approved_ids: HashSet::new(),
        }
    }

    /// Suggestions not approved yet.
    pub fn available(&self) -> impl Iterator<Item = &'a RouteSuggestion> + '_ {
        self.suggestions
            .iter()
            .filter(move |r| !self.approved_ids.contains(r.id))
    }

    /// Approved routes, most recent first.
    pub fn approved(&self) -> &[ApprovedRoute] {
        &self.approved
    }

    pub fn approve(
        &mut self,
        id: &str,
        now: OffsetDateTime,
    ) -> Result<&ApprovedRoute, ApprovalError> {
        let route = self
            .suggestions
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ApprovalError::UnknownRoute(id.to_string()))?;
        if !self.approved_ids.insert(route.id) {
            return Err(ApprovalError::AlreadyApproved(route.id.to_string()));
        }

        tracing::info!(route = route.id, from = route.from, to = route.to, "route approved");
        self.approved.insert(
            0,
            ApprovedRoute {
                id: route.id,
                from: route.from,
                to: route.to,
                distance_km: route.distance_km,
                duration_minutes: route.duration_minutes,
                efficiency: route.efficiency,
                vehicles: route.vehicles,
                approved_at: now,
            },
        );
        Ok(&self.approved[0])
    }
}

/// Position of a checkpoint along a route in percent of the route's length.
pub fn checkpoint_position(checkpoint: &Checkpoint, route_distance_km: f64) -> f64 {
    checkpoint.distance_km / route_distance_km * 100.0
}
