// Assembles the JSON map document consumed by the rendering collaborator.

use canvassing::{map_center, FilterOutcome, HouseholdRecord, VisitStats};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StatsDoc {
    pub total: usize,
    pub visited: usize,
    pub remaining: usize,
    #[serde(rename = "inProgress")]
    pub in_progress: usize,
    pub priority: usize,
}

impl From<&VisitStats> for StatsDoc {
    fn from(stats: &VisitStats) -> StatsDoc {
        StatsDoc {
            total: stats.total,
            visited: stats.visited,
            remaining: stats.remaining,
            in_progress: stats.in_progress,
            priority: stats.priority,
        }
    }
}

/// Builds the full map document: summary counts, dropped-row count, map
/// center, one marker per filtered record and, on demand, the heat layer
/// points.
///
/// An empty subset yields an empty marker list and a null center; the
/// rendering side shows the zero state instead of a map.
pub fn build_map_doc(outcome: &FilterOutcome, dropped_rows: usize, heatmap: bool) -> JSValue {
    let stats = StatsDoc::from(&outcome.stats);
    let markers: Vec<JSValue> = outcome.subset.iter().map(marker).collect();
    let center: JSValue = match map_center(&outcome.subset) {
        Some((lat, lon)) => json!([lat, lon]),
        None => JSValue::Null,
    };
    let mut doc = json!({
        "stats": stats,
        "droppedRows": dropped_rows,
        "center": center,
        "markers": markers,
    });
    if heatmap {
        let heat: Vec<JSValue> = outcome
            .subset
            .iter()
            .map(|r| json!([r.lat, r.lon]))
            .collect();
        doc["heat"] = json!(heat);
    }
    doc
}

fn marker(r: &HouseholdRecord) -> JSValue {
    json!({
        "lat": r.lat,
        "lon": r.lon,
        "color": r.status.marker_color(),
        "popup": popup_html(r),
    })
}

/// The popup shown when a marker is selected.
fn popup_html(r: &HouseholdRecord) -> String {
    let priority_line = if r.priority {
        "Prioritaire : oui<br>"
    } else {
        ""
    };
    format!(
        "<b>{} {}</b><br>Adresse : {}<br>Famille ID : {}<br>État : {}<br>Membres : {}<br>{}",
        r.name,
        r.first_names,
        r.address,
        r.family_id,
        r.status.label(),
        r.members,
        priority_line
    )
}
