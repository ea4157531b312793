mod builder;
mod config;
use log::{debug, info};

use std::collections::BTreeSet;

pub use crate::builder::CriteriaBuilder;
pub use crate::config::*;

/// Default street name when the source column has no value for a row.
pub const UNKNOWN_STREET: &str = "Unknown";

/// Builds the canonical record set out of raw reader rows.
///
/// Defaults are applied field by field; rows without usable coordinates are
/// dropped unconditionally and counted. The input order is preserved and
/// duplicate coordinates are kept: two families can live at the same point.
pub fn build_canonical(rows: &[RawVisitRow]) -> CanonicalSet {
    let mut records: Vec<HouseholdRecord> = Vec::with_capacity(rows.len());
    let mut dropped_rows: usize = 0;
    for row in rows.iter() {
        let (lat, lon) = match (row.lat, row.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => (lat, lon),
            _ => {
                debug!("build_canonical: dropping row without coordinates: {:?}", row);
                dropped_rows += 1;
                continue;
            }
        };
        let street = match &row.street {
            Some(s) => s.trim().to_string(),
            None => UNKNOWN_STREET.to_string(),
        };
        let status = match &row.status {
            Some(s) => VisitStatus::parse(s),
            None => VisitStatus::ToVisit,
        };
        // Values outside u32 take the failed-coercion default, like any
        // other bad value.
        let members = match row.members {
            Some(m) => u32::try_from(m).unwrap_or(1),
            None => 1,
        };
        records.push(HouseholdRecord {
            name: row.name.clone().unwrap_or_default(),
            first_names: row.first_names.clone().unwrap_or_default(),
            address: row.address.clone().unwrap_or_default(),
            family_id: row.family_id.clone().unwrap_or_default(),
            street,
            lat,
            lon,
            status,
            priority: row.priority.unwrap_or(false),
            members,
        });
    }
    info!(
        "build_canonical: {} records kept, {} rows dropped",
        records.len(),
        dropped_rows
    );
    CanonicalSet {
        records,
        dropped_rows,
    }
}

/// Applies the filter criteria to the canonical records.
///
/// The criteria are conjunctive and applied in a fixed order (neighborhood,
/// status, priority, member range); a stage is skipped once the subset is
/// already empty. Pure function of its inputs: the canonical set is never
/// mutated.
pub fn apply_criteria(records: &[HouseholdRecord], criteria: &FilterCriteria) -> FilterOutcome {
    debug!(
        "apply_criteria: {} records, criteria: {:?}",
        records.len(),
        criteria
    );
    let mut subset: Vec<HouseholdRecord> = records.to_vec();

    if let NeighborhoodFilter::Only(streets) = &criteria.neighborhoods {
        subset.retain(|r| streets.contains(&r.street));
    }
    if !subset.is_empty() {
        subset.retain(|r| criteria.statuses.contains(&r.status));
    }
    if !subset.is_empty() && criteria.priority_only {
        subset.retain(|r| r.priority);
    }
    if !subset.is_empty() {
        if let Some((min, max)) = criteria.member_range {
            subset.retain(|r| r.members >= min && r.members <= max);
        }
    }

    let stats = summarize(&subset);
    debug!("apply_criteria: stats: {:?}", stats);
    FilterOutcome { subset, stats }
}

/// Aggregate counts over a record subset.
pub fn summarize(subset: &[HouseholdRecord]) -> VisitStats {
    let mut stats = VisitStats {
        total: subset.len(),
        ..VisitStats::default()
    };
    for r in subset.iter() {
        match r.status {
            VisitStatus::Visited => stats.visited += 1,
            VisitStatus::ToVisit => stats.remaining += 1,
            VisitStatus::InProgress => stats.in_progress += 1,
            VisitStatus::Other(_) => {}
        }
        if r.priority {
            stats.priority += 1;
        }
    }
    stats
}

/// Observed inclusive bounds of the member counts, used to size the range
/// control. Collapses to (0, 0) when there is no data.
pub fn member_bounds(records: &[HouseholdRecord]) -> (u32, u32) {
    let min = records.iter().map(|r| r.members).min();
    let max = records.iter().map(|r| r.members).max();
    match (min, max) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => (0, 0),
    }
}

/// Distinct street names sorted without case sensitivity, ready for the
/// neighborhood selector.
pub fn neighborhood_names(records: &[HouseholdRecord]) -> Vec<String> {
    let distinct: BTreeSet<String> = records.iter().map(|r| r.street.clone()).collect();
    let mut names: Vec<String> = distinct.into_iter().collect();
    names.sort_by_key(|s| s.to_lowercase());
    names
}

/// Mean coordinate of the subset, where the map should be centered.
/// `None` for an empty subset: the caller shows the zero state instead of a map.
pub fn map_center(records: &[HouseholdRecord]) -> Option<(f64, f64)> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let lat = records.iter().map(|r| r.lat).sum::<f64>() / n;
    let lon = records.iter().map(|r| r.lon).sum::<f64>() / n;
    Some((lat, lon))
}
