//! Groups flat PMIS records into heatmaps.
//!
//! A heatmap is every row sharing a highway id and county. Rows missing
//! either identifier belong to no heatmap and are dropped here.

use std::collections::BTreeMap;

use crate::model::{HeatmapKey, Record};

/// Heatmaps keyed by `(highway_id, county)`, iterated in key order.
/// Each value keeps its rows in input order.
pub type Heatmaps = BTreeMap<HeatmapKey, Vec<Record>>;

/// Group records by heatmap, consuming them.
///
/// Records without a complete key are skipped; they contribute to no
/// heatmap and to no count.
pub fn group_by_heatmap(records: Vec<Record>) -> Heatmaps {
    let mut heatmaps = Heatmaps::new();

    for record in records {
        if let Some(key) = record.heatmap_key() {
            heatmaps.entry(key).or_default().push(record);
        }
    }

    heatmaps
}

/// The group's scores that coerced to a number, in row order.
pub fn valid_scores(rows: &[Record]) -> Vec<f64> {
    rows.iter().filter_map(|r| r.score).collect()
}
