/// Console report for a heatmap run.
///
/// Rendering is kept separate from printing so the exact text can be
/// checked in tests.

use crate::analysis::summary::HeatmapSummary;
use crate::model::AnalysisError;

/// Separator line framing the summary block.
pub const RULE: &str = "------------------------------";

/// Formats `count (pct%)` with two decimals.
fn count_with_pct(count: usize, pct: f64) -> String {
    format!("{} ({:.2}%)", count, pct)
}

/// Render the summary block, one line per entry.
///
/// With no heatmaps the percentage lines are replaced by a single notice
/// rather than dividing by zero.
pub fn render_summary(summary: &HeatmapSummary) -> Vec<String> {
    let cutoff = summary.thresholds.low_score_cutoff;
    let n = summary.thresholds.min_valid_points;

    let mut lines = vec![
        RULE.to_string(),
        format!("Total Heatmaps (Highway-County pairs): {}", summary.total_groups),
    ];

    match (summary.no_cells_below_cutoff_pct(), summary.below_n_threshold_pct()) {
        (Some(low_pct), Some(sparse_pct)) => {
            lines.push(format!(
                "Heatmaps with NO cells with score < {}: {}",
                cutoff,
                count_with_pct(summary.no_cells_below_cutoff_count, low_pct)
            ));
            lines.push(format!(
                "Heatmaps with N < {} (valid points): {}",
                n,
                count_with_pct(summary.below_n_threshold_count, sparse_pct)
            ));
        }
        _ => lines.push("No heatmaps found; percentages not computed.".to_string()),
    }

    lines.push(RULE.to_string());
    lines
}

/// Print the summary block to stdout.
pub fn print_summary(summary: &HeatmapSummary) {
    for line in render_summary(summary) {
        println!("{}", line);
    }
}

/// Line reported in place of the summary when the input cannot be loaded.
pub fn render_load_failure(err: &AnalysisError) -> String {
    format!("Error: {}", err)
}

/// Print the load failure to stdout, where the progress lines went.
pub fn print_load_failure(err: &AnalysisError) {
    println!("{}", render_load_failure(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::thresholds::HeatmapThresholds;

    fn summary(total: usize, low: usize, sparse: usize) -> HeatmapSummary {
        HeatmapSummary {
            total_groups: total,
            no_cells_below_cutoff_count: low,
            below_n_threshold_count: sparse,
            thresholds: HeatmapThresholds::default(),
        }
    }

    #[test]
    fn test_report_matches_expected_layout() {
        let lines = render_summary(&summary(1, 0, 1));
        assert_eq!(
            lines,
            vec![
                "------------------------------",
                "Total Heatmaps (Highway-County pairs): 1",
                "Heatmaps with NO cells with score < 50: 0 (0.00%)",
                "Heatmaps with N < 5 (valid points): 1 (100.00%)",
                "------------------------------",
            ]
        );
    }

    #[test]
    fn test_percentages_round_to_two_decimals() {
        let lines = render_summary(&summary(3, 2, 1));
        assert_eq!(lines[2], "Heatmaps with NO cells with score < 50: 2 (66.67%)");
        assert_eq!(lines[3], "Heatmaps with N < 5 (valid points): 1 (33.33%)");
    }

    #[test]
    fn test_zero_heatmaps_skip_percentages() {
        let lines = render_summary(&summary(0, 0, 0));
        assert_eq!(
            lines,
            vec![
                "------------------------------",
                "Total Heatmaps (Highway-County pairs): 0",
                "No heatmaps found; percentages not computed.",
                "------------------------------",
            ]
        );
    }

    #[test]
    fn test_report_reflects_configured_thresholds() {
        let mut s = summary(4, 1, 2);
        s.thresholds = HeatmapThresholds { low_score_cutoff: 62.5, min_valid_points: 10 };
        let lines = render_summary(&s);
        assert_eq!(lines[2], "Heatmaps with NO cells with score < 62.5: 1 (25.00%)");
        assert_eq!(lines[3], "Heatmaps with N < 10 (valid points): 2 (50.00%)");
    }

    #[test]
    fn test_missing_file_line_names_the_path() {
        let err = AnalysisError::FileNotFound("./PMIS_2024_trimmed.csv".to_string());
        assert_eq!(render_load_failure(&err), "Error: File not found at ./PMIS_2024_trimmed.csv");
    }
}
