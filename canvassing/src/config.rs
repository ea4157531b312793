// ********* Input data structures ***********

use std::collections::BTreeSet;

/// The visit state of a household, as tracked by the field teams.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum VisitStatus {
    ToVisit,
    Visited,
    InProgress,
    /// A label in the source data that does not match any known state.
    /// It is kept as-is instead of being rewritten to a default, so that
    /// the operator can spot it on the map.
    Other(String),
}

impl VisitStatus {
    /// Parses a status label from the source data. Both the canonical English
    /// labels and the French labels used by the field spreadsheets are accepted.
    pub fn parse(label: &str) -> VisitStatus {
        match label.trim() {
            "To visit" | "À visiter" => VisitStatus::ToVisit,
            "Visited" | "Visité" => VisitStatus::Visited,
            "In progress" | "En cours" => VisitStatus::InProgress,
            other => VisitStatus::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            VisitStatus::ToVisit => "To visit",
            VisitStatus::Visited => "Visited",
            VisitStatus::InProgress => "In progress",
            VisitStatus::Other(s) => s.as_str(),
        }
    }

    /// Marker color understood by the map collaborator.
    pub fn marker_color(&self) -> &'static str {
        match self {
            VisitStatus::ToVisit => "red",
            VisitStatus::Visited => "green",
            VisitStatus::InProgress => "orange",
            VisitStatus::Other(_) => "blue",
        }
    }

    /// The three known states, in display order.
    pub fn known() -> Vec<VisitStatus> {
        vec![
            VisitStatus::ToVisit,
            VisitStatus::Visited,
            VisitStatus::InProgress,
        ]
    }
}

/// One household, after load-time cleaning.
///
/// Invariant: `lat` and `lon` are finite. Rows that cannot satisfy this are
/// dropped when the canonical set is built.
#[derive(PartialEq, Debug, Clone)]
pub struct HouseholdRecord {
    pub name: String,
    pub first_names: String,
    pub address: String,
    /// Empty string when the source had no family identifier.
    pub family_id: String,
    /// "Unknown" when the source had no street name. Trimmed.
    pub street: String,
    pub lat: f64,
    pub lon: f64,
    pub status: VisitStatus,
    pub priority: bool,
    pub members: u32,
}

/// A row as produced by the file readers, before normalization.
///
/// Every field is optional; the numeric coercion of the coordinates has
/// already happened in the reader (a cell that fails coercion is `None`).
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawVisitRow {
    pub name: Option<String>,
    pub first_names: Option<String>,
    pub address: Option<String>,
    pub family_id: Option<String>,
    pub street: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub status: Option<String>,
    pub priority: Option<bool>,
    pub members: Option<i64>,
}

/// The canonical record set, plus the number of source rows that were dropped
/// for missing or non-numeric coordinates.
#[derive(PartialEq, Debug, Clone)]
pub struct CanonicalSet {
    pub records: Vec<HouseholdRecord>,
    pub dropped_rows: usize,
}

// ********* Filter configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NeighborhoodFilter {
    /// Sentinel for "all streets" (the « Tous » entry of the selector).
    All,
    /// Exact, case-sensitive street names to keep.
    Only(BTreeSet<String>),
}

/// The combined filter configuration. All criteria are conjunctive and
/// independently optional.
#[derive(PartialEq, Debug, Clone)]
pub struct FilterCriteria {
    pub neighborhoods: NeighborhoodFilter,
    /// A record is kept only if its status is a member of this set.
    /// An empty set selects nothing, which is a valid outcome and not an error.
    pub statuses: BTreeSet<VisitStatus>,
    pub priority_only: bool,
    /// Inclusive bounds on the member count; `None` disables the stage.
    pub member_range: Option<(u32, u32)>,
}

impl Default for FilterCriteria {
    /// The state of the UI controls before the operator touches anything:
    /// all streets, the three known statuses, no priority restriction.
    fn default() -> FilterCriteria {
        FilterCriteria {
            neighborhoods: NeighborhoodFilter::All,
            statuses: VisitStatus::known().into_iter().collect(),
            priority_only: false,
            member_range: None,
        }
    }
}

// ******** Output data structures *********

/// Scalar counts over the filtered subset.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct VisitStats {
    pub total: usize,
    pub visited: usize,
    pub remaining: usize,
    pub in_progress: usize,
    pub priority: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct FilterOutcome {
    pub subset: Vec<HouseholdRecord>,
    pub stats: VisitStats,
}
