//! Per-heatmap threshold checks.
//!
//! Two questions are asked of every heatmap: does any cell score below the
//! low-score cutoff, and does it have enough valid points to be drawn.

use crate::analysis::groupings::valid_scores;
use crate::model::Record;

/// Scores strictly below this value mark a cell as poor condition.
pub const LOW_SCORE_CUTOFF: f64 = 50.0;

/// Default minimum number of valid points for a usable heatmap.
pub const DEFAULT_THRESHOLD_N: usize = 5;

/// Limits applied to every heatmap in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapThresholds {
    /// Cutoff below which a score counts as low.
    pub low_score_cutoff: f64,
    /// Heatmaps with fewer valid scores than this are sparse.
    pub min_valid_points: usize,
}

impl Default for HeatmapThresholds {
    fn default() -> Self {
        Self {
            low_score_cutoff: LOW_SCORE_CUTOFF,
            min_valid_points: DEFAULT_THRESHOLD_N,
        }
    }
}

/// Threshold results for a single heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCheck {
    /// Rows in the heatmap, including those without a valid score.
    pub row_count: usize,
    /// Rows whose score coerced to a number.
    pub valid_points: usize,
    /// `true` when no valid score is below the cutoff. Vacuously true for
    /// a heatmap with no valid scores.
    pub no_cells_below_cutoff: bool,
    /// `true` when `valid_points` is below the minimum.
    pub below_n_threshold: bool,
}

/// Returns `true` if none of `scores` is strictly below `cutoff`.
pub fn has_no_low_scores(scores: &[f64], cutoff: f64) -> bool {
    !scores.iter().any(|&s| s < cutoff)
}

/// Returns `true` if there are fewer than `min_valid_points` scores.
///
/// N counts valid scores only; rows whose score failed to parse do not help
/// a heatmap reach the minimum.
pub fn is_below_n_threshold(scores: &[f64], min_valid_points: usize) -> bool {
    scores.len() < min_valid_points
}

/// Evaluate both thresholds for one heatmap's rows.
pub fn check_heatmap(rows: &[Record], thresholds: &HeatmapThresholds) -> HeatmapCheck {
    let scores = valid_scores(rows);

    HeatmapCheck {
        row_count: rows.len(),
        valid_points: scores.len(),
        no_cells_below_cutoff: has_no_low_scores(&scores, thresholds.low_score_cutoff),
        below_n_threshold: is_below_n_threshold(&scores, thresholds.min_valid_points),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
