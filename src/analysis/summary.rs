//! Run-wide heatmap counts.

use crate::analysis::groupings::Heatmaps;
use crate::analysis::thresholds::{check_heatmap, HeatmapThresholds};
use crate::logging::{self, Stage};

/// Aggregate threshold results across every heatmap in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSummary {
    pub total_groups: usize,
    /// Heatmaps in which no valid score is below the cutoff.
    pub no_cells_below_cutoff_count: usize,
    /// Heatmaps with fewer valid points than N.
    pub below_n_threshold_count: usize,
    pub thresholds: HeatmapThresholds,
}

impl HeatmapSummary {
    /// `count` as a percentage of all heatmaps.
    ///
    /// Returns `None` when there are no heatmaps, since there is nothing to
    /// take a share of.
    pub fn percentage(&self, count: usize) -> Option<f64> {
        if self.total_groups == 0 {
            return None;
        }
        Some(count as f64 / self.total_groups as f64 * 100.0)
    }

    pub fn no_cells_below_cutoff_pct(&self) -> Option<f64> {
        self.percentage(self.no_cells_below_cutoff_count)
    }

    pub fn below_n_threshold_pct(&self) -> Option<f64> {
        self.percentage(self.below_n_threshold_count)
    }
}

/// Check every heatmap and tally the results.
pub fn summarize(heatmaps: &Heatmaps, thresholds: &HeatmapThresholds) -> HeatmapSummary {
    let mut summary = HeatmapSummary {
        total_groups: 0,
        no_cells_below_cutoff_count: 0,
        below_n_threshold_count: 0,
        thresholds: *thresholds,
    };

    for (key, rows) in heatmaps {
        summary.total_groups += 1;

        let check = check_heatmap(rows, thresholds);
        if check.no_cells_below_cutoff {
            summary.no_cells_below_cutoff_count += 1;
        }
        if check.below_n_threshold {
            summary.below_n_threshold_count += 1;
            let context = key.to_string();
            logging::debug(
                Stage::Analyze,
                Some(&context),
                &format!(
                    "sparse heatmap: {} valid of {} rows (N = {})",
                    check.valid_points, check.row_count, thresholds.min_valid_points
                ),
            );
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::groupings::group_by_heatmap;
    use crate::model::Record;

    fn row(highway: &str, county: &str, score: Option<f64>) -> Record {
        Record {
            highway_id: Some(highway.to_string()),
            county: Some(county.to_string()),
            score,
        }
    }

    fn summarize_rows(records: Vec<Record>) -> HeatmapSummary {
        summarize(&group_by_heatmap(records), &HeatmapThresholds::default())
    }

    #[test]
    fn test_single_heatmap_with_a_low_cell() {
        let summary = summarize_rows(vec![
            row("IH0035 K", "TRAVIS", Some(10.0)),
            row("IH0035 K", "TRAVIS", Some(60.0)),
        ]);
        assert_eq!(summary.total_groups, 1);
        assert_eq!(summary.no_cells_below_cutoff_count, 0);
        assert_eq!(summary.below_n_threshold_count, 1);
        assert_eq!(summary.no_cells_below_cutoff_pct(), Some(0.0));
        assert_eq!(summary.below_n_threshold_pct(), Some(100.0));
    }

    #[test]
    fn test_single_heatmap_without_low_cells() {
        let summary = summarize_rows(vec![
            row("IH0035 K", "TRAVIS", Some(60.0)),
            row("IH0035 K", "TRAVIS", Some(70.0)),
        ]);
        assert_eq!(summary.no_cells_below_cutoff_pct(), Some(100.0));
        assert_eq!(summary.below_n_threshold_pct(), Some(100.0));
    }

    #[test]
    fn test_counts_never_exceed_total() {
        let mut records = Vec::new();
        for (i, county) in ["BELL", "BEXAR", "HAYS", "TRAVIS"].iter().enumerate() {
            for j in 0..(i * 2) {
                records.push(row("IH0035 K", county, Some(30.0 + (j as f64) * 10.0)));
            }
            records.push(row("IH0035 K", county, None));
        }
        let summary = summarize_rows(records);
        assert_eq!(summary.total_groups, 4);
        assert!(summary.no_cells_below_cutoff_count <= summary.total_groups);
        assert!(summary.below_n_threshold_count <= summary.total_groups);
    }

    #[test]
    fn test_mixed_heatmaps_give_fractional_percentages() {
        let mut records = vec![row("US0183 K", "TRAVIS", Some(20.0))];
        for _ in 0..5 {
            records.push(row("IH0035 K", "TRAVIS", Some(90.0)));
        }
        records.push(row("SH0071 K", "BASTROP", Some(80.0)));

        let summary = summarize_rows(records);
        assert_eq!(summary.total_groups, 3);
        assert_eq!(summary.no_cells_below_cutoff_count, 2);
        assert_eq!(summary.below_n_threshold_count, 2);
        let pct = summary.no_cells_below_cutoff_pct().expect("non-empty run");
        assert!((pct - 66.666_666).abs() < 1e-4, "got {}", pct);
    }

    #[test]
    fn test_zero_heatmaps_have_no_percentages() {
        let summary = summarize_rows(Vec::new());
        assert_eq!(summary.total_groups, 0);
        assert_eq!(summary.no_cells_below_cutoff_pct(), None);
        assert_eq!(summary.below_n_threshold_pct(), None);
    }
}
